//! Template state detection.
//!
//! A cached template is only trusted when its marker file is present. The
//! state is never memoized: an interrupted download that left a directory
//! without its marker is detected again on the next run.

use super::entry::{TemplateLocation, TemplateState};

/// Root configuration file whose presence marks a complete template.
pub const MARKER_FILE: &str = "config.xml";

/// Payload subtree copied into new projects.
pub const PAYLOAD_DIR: &str = "www";

/// Compute the state of a template location from disk.
pub fn template_state(location: &TemplateLocation) -> TemplateState {
    if !location.path().exists() {
        return TemplateState::Absent;
    }

    if location.marker_path().is_file() || location.payload_marker_path().is_file() {
        TemplateState::Valid
    } else {
        TemplateState::Corrupt
    }
}
