//! Create pipeline orchestration.
//!
//! A run moves through three stages and ends in exactly one terminal event:
//!
//! ```text
//! Validating --ok--> Fetching --ok--> Materializing --ok--> Complete
//!      |                 |                  |
//!      +-----------------+------------------+--err--> Error
//! ```
//!
//! [`CreatePipeline::create`] checks the request and hands back a
//! [`CreateTask`] without touching the filesystem. Nothing runs until the
//! caller has attached listeners and calls [`CreateTask::run`] or
//! [`CreateTask::spawn`].

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::cache::{DiskTemplateCache, TemplateCache};
use crate::config::SproutConfig;
use crate::error::{Result, SproutError};
use crate::fetch::{CachedTemplateFetcher, HttpDownloader, TemplateFetcher};

use super::materializer::{FsProjectMaterializer, ProjectMaterializer};
use super::request::CreateRequest;
use super::validator::{EmptyDirValidator, PathValidator};

/// A stage of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking that the destination is nonexistent or empty.
    Validating,
    /// Making sure the template is in the cache.
    Fetching,
    /// Copying the template into the destination.
    Materializing,
}

impl Stage {
    /// Human-readable progress message.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Validating => "Checking destination",
            Self::Fetching => "Fetching template",
            Self::Materializing => "Creating project",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Notification emitted during a run.
#[derive(Debug)]
pub enum PipelineEvent {
    /// A stage is starting.
    Stage(Stage),
    /// The project was created. Terminal.
    Complete,
    /// The run failed. Terminal.
    Error(SproutError),
}

impl PipelineEvent {
    /// Whether this event ends the run.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Stage(_))
    }
}

type Listener = Box<dyn FnMut(&PipelineEvent) + Send>;

/// Orchestrates validation, fetching and materialization.
///
/// Every stage is injected, so tests can substitute any of them.
#[derive(Clone)]
pub struct CreatePipeline {
    validator: Arc<dyn PathValidator>,
    fetcher: Arc<dyn TemplateFetcher>,
    materializer: Arc<dyn ProjectMaterializer>,
}

impl CreatePipeline {
    /// Create a pipeline from explicit stages.
    pub fn new(
        validator: Arc<dyn PathValidator>,
        fetcher: Arc<dyn TemplateFetcher>,
        materializer: Arc<dyn ProjectMaterializer>,
    ) -> Self {
        Self {
            validator,
            fetcher,
            materializer,
        }
    }

    /// Wire the filesystem validator, disk cache, HTTP downloader and
    /// filesystem materializer from configuration.
    pub fn from_config(config: &SproutConfig) -> Result<Self> {
        let cache: Arc<dyn TemplateCache> = Arc::new(DiskTemplateCache::new(config.cache_root()));
        let downloader = HttpDownloader::with_timeout(config.download_timeout())?;
        let fetcher =
            CachedTemplateFetcher::new(cache.clone(), Arc::new(downloader), &config.template_url);

        Ok(Self::new(
            Arc::new(EmptyDirValidator),
            Arc::new(fetcher),
            Arc::new(FsProjectMaterializer::new(cache)),
        ))
    }

    /// Prepare a run for `destination` and `version`.
    ///
    /// Empty or malformed fields fail here with
    /// [`SproutError::InvalidRequest`]; no task is returned and no I/O
    /// happens.
    pub fn create(
        &self,
        destination: impl Into<PathBuf>,
        version: impl Into<String>,
    ) -> Result<CreateTask> {
        let request = CreateRequest::new(destination, version)?;
        Ok(self.task(request))
    }

    /// Prepare a run for an already validated request.
    pub fn task(&self, request: CreateRequest) -> CreateTask {
        CreateTask {
            request,
            pipeline: self.clone(),
            listeners: Vec::new(),
        }
    }

    fn execute(&self, request: &CreateRequest, emit: &mut dyn FnMut(PipelineEvent)) -> Result<()> {
        emit(PipelineEvent::Stage(Stage::Validating));
        self.validator.validate(request.destination())?;

        emit(PipelineEvent::Stage(Stage::Fetching));
        self.fetcher.ensure(request.version())?;

        emit(PipelineEvent::Stage(Stage::Materializing));
        self.materializer.create(request)
    }
}

/// A pending pipeline run.
///
/// The task is inert until [`run`](Self::run) or [`spawn`](Self::spawn)
/// consumes it, so a run can only ever produce one terminal event.
pub struct CreateTask {
    request: CreateRequest,
    pipeline: CreatePipeline,
    listeners: Vec<Listener>,
}

impl CreateTask {
    /// The request this task will run.
    pub fn request(&self) -> &CreateRequest {
        &self.request
    }

    /// Register a listener called for every event, in order.
    pub fn on_event<F>(&mut self, listener: F) -> &mut Self
    where
        F: FnMut(&PipelineEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Run to completion on the current thread.
    pub fn run(self) -> Result<()> {
        let mut outcome = Ok(());
        self.drive(|event| {
            if let PipelineEvent::Error(e) = event {
                outcome = Err(e);
            }
        });
        outcome
    }

    /// Run on a worker thread. Events are delivered through the returned
    /// handle.
    pub fn spawn(self) -> TaskHandle {
        let (tx, rx) = mpsc::channel();
        let thread = thread::spawn(move || {
            self.drive(|event| {
                let _ = tx.send(event);
            })
        });

        TaskHandle { events: rx, thread }
    }

    fn drive<S>(self, mut sink: S)
    where
        S: FnMut(PipelineEvent),
    {
        let CreateTask {
            request,
            pipeline,
            mut listeners,
        } = self;

        let mut emit = |event: PipelineEvent| {
            if let PipelineEvent::Stage(stage) = &event {
                tracing::debug!("{} ({})", stage, request.destination().display());
            }
            for listener in listeners.iter_mut() {
                listener(&event);
            }
            sink(event);
        };

        let terminal = match pipeline.execute(&request, &mut emit) {
            Ok(()) => PipelineEvent::Complete,
            Err(e) => {
                tracing::debug!("Create failed: {}", e);
                PipelineEvent::Error(e)
            }
        };
        emit(terminal);
    }
}

/// Handle to a run started with [`CreateTask::spawn`].
pub struct TaskHandle {
    events: mpsc::Receiver<PipelineEvent>,
    thread: thread::JoinHandle<()>,
}

impl TaskHandle {
    /// Block until the run ends, passing every event to `on_event` first.
    pub fn wait_with<F>(self, mut on_event: F) -> Result<()>
    where
        F: FnMut(&PipelineEvent),
    {
        let mut outcome = None;
        for event in self.events.iter() {
            on_event(&event);
            match event {
                PipelineEvent::Stage(_) => {}
                PipelineEvent::Complete => {
                    outcome = Some(Ok(()));
                    break;
                }
                PipelineEvent::Error(e) => {
                    outcome = Some(Err(e));
                    break;
                }
            }
        }

        // A panicking listener drops the sender before a terminal event.
        if self.thread.join().is_err() {
            tracing::debug!("Create task thread panicked");
        }
        outcome.unwrap_or_else(|| {
            Err(SproutError::Other(anyhow::anyhow!(
                "create task ended without a result"
            )))
        })
    }

    /// Block until the run ends.
    pub fn wait(self) -> Result<()> {
        self.wait_with(|_| {})
    }
}
