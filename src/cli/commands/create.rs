//! Create command implementation.
//!
//! `sprout create <path>` runs the create pipeline and reports each stage
//! with a spinner.

use crate::cli::args::CreateArgs;
use crate::config::SproutConfig;
use crate::create::{CreatePipeline, PipelineEvent, Stage};
use crate::error::Result;
use crate::ui::{SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The create command implementation.
pub struct CreateCommand {
    config: SproutConfig,
    args: CreateArgs,
    pipeline: Option<CreatePipeline>,
}

impl CreateCommand {
    /// Create a new create command.
    pub fn new(config: &SproutConfig, args: CreateArgs) -> Self {
        let mut config = config.clone();
        if let Some(url) = &args.template_url {
            config.template_url = url.clone();
        }

        Self {
            config,
            args,
            pipeline: None,
        }
    }

    /// Use an explicit pipeline instead of one built from configuration.
    pub fn with_pipeline(mut self, pipeline: CreatePipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Platform version to create, falling back to the configured default.
    pub fn version(&self) -> &str {
        self.args
            .platform_version
            .as_deref()
            .unwrap_or(&self.config.default_version)
    }
}

impl Command for CreateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pipeline = match &self.pipeline {
            Some(pipeline) => pipeline.clone(),
            None => CreatePipeline::from_config(&self.config)?,
        };

        let task = pipeline.create(&self.args.path, self.version())?;
        let destination = task.request().destination().display().to_string();
        let version = task.request().version().to_string();

        let mut current: Option<(Stage, Box<dyn SpinnerHandle>)> = None;
        let outcome = task.spawn().wait_with(|event| match event {
            PipelineEvent::Stage(stage) => {
                if let Some((done, mut spinner)) = current.take() {
                    spinner.finish_success(done.description());
                }
                current = Some((*stage, ui.start_spinner(stage.description())));
            }
            PipelineEvent::Complete => {
                if let Some((done, mut spinner)) = current.take() {
                    spinner.finish_success(done.description());
                }
            }
            PipelineEvent::Error(_) => {
                if let Some((failed, mut spinner)) = current.take() {
                    spinner.finish_error(&format!("{} failed", failed.description()));
                }
            }
        });

        match outcome {
            Ok(()) => {
                ui.success(&format!(
                    "Created project at {} (platform {})",
                    destination, version
                ));
                Ok(CommandResult::success())
            }
            Err(e) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
        }
    }
}
