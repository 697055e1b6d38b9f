use std::path::PathBuf;

use crate::models::error::FilePickError;

/// Destination chosen in a save dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub path: PathBuf,
    /// The user asked to replace an existing file at this path.
    pub replace_existing: bool,
}

/// The platform save-file prompt.
pub trait FilePicker: Send {
    /// Prompt for a destination file. Returns the chosen target, or
    /// [`FilePickError::Cancelled`] if the user dismissed the dialog.
    fn put_file(&mut self, prompt: &str, default_name: &str) -> Result<SaveTarget, FilePickError>;
}
