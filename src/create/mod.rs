//! Project creation.
//!
//! - [`request`] - the validated [`CreateRequest`]
//! - [`validator`] - destination checks ([`PathValidator`])
//! - [`materializer`] - copying a cached template into a project
//!   ([`ProjectMaterializer`])
//! - [`pipeline`] - the [`CreatePipeline`] orchestrating a run
//!
//! # Example
//!
//! ```no_run
//! use sprout::config::SproutConfig;
//! use sprout::create::{CreatePipeline, PipelineEvent};
//!
//! let pipeline = CreatePipeline::from_config(&SproutConfig::default()).unwrap();
//! let mut task = pipeline.create("my-app", "3.3.0").unwrap();
//! task.on_event(|event| {
//!     if let PipelineEvent::Stage(stage) = event {
//!         println!("{stage}...");
//!     }
//! });
//! task.run().unwrap();
//! ```

pub mod materializer;
pub mod pipeline;
pub mod request;
pub mod validator;

pub use materializer::{FsProjectMaterializer, ProjectMaterializer, SKELETON_DIRS};
pub use pipeline::{CreatePipeline, CreateTask, PipelineEvent, Stage, TaskHandle};
pub use request::CreateRequest;
pub use validator::{EmptyDirValidator, PathValidator};
