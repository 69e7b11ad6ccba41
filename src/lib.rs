//! Sprout - scaffold mobile app projects from versioned, cached templates.
//!
//! A project is created in three stages: the destination is checked, the
//! template for the requested platform version is made available in the
//! local cache (downloading it if needed), and the template payload is
//! copied into the destination alongside the project skeleton.
//!
//! # Modules
//!
//! - [`cache`] - On-disk template cache and template state
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - User configuration loading
//! - [`create`] - Create requests, stages, and the create pipeline
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Template download and archive extraction
//! - [`ui`] - Spinners, prompts, and terminal output
//!
//! # Example
//!
//! ```
//! use sprout::create::CreateRequest;
//!
//! let request = CreateRequest::new("./my-app", "3.3.0").unwrap();
//! assert_eq!(request.version(), "3.3.0");
//! assert!(CreateRequest::new("./my-app", "../escape").is_err());
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod create;
pub mod error;
pub mod fetch;
pub mod ui;

pub use error::{Result, SproutError};
