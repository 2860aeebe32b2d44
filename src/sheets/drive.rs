//! Drive file boundary.
//!
//! How timesheet files are located and copied is the host platform's
//! business; the engine only needs these three calls.

use crate::error::EngineResult;

/// Access to the drive directory holding per-worker timesheet files.
pub trait DriveStore {
    /// Finds the file id for `name` inside `directory`, if it exists.
    fn file_id(&self, directory: &str, name: &str) -> EngineResult<Option<String>>;

    /// Finds the browser link for `name` inside `directory`, if it exists.
    fn file_url(&self, directory: &str, name: &str) -> EngineResult<Option<String>>;

    /// Copies the template sheet into every file in `directory` as a new
    /// tab named `new_name`.
    fn copy_template(&self, directory: &str, template: &str, new_name: &str) -> EngineResult<()>;
}
