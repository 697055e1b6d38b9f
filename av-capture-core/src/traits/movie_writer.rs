use std::path::Path;

use crate::models::error::ContainerError;

/// Creation flags for a movie container.
///
/// Deferred flags postpone materialization of the file, the movie, and its
/// resources until data is actually written, so a recording that fails
/// immediately leaves no truncated container behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFlags {
    pub defer_file: bool,
    pub defer_movie: bool,
    pub defer_resources: bool,
}

impl ContainerFlags {
    pub const DEFERRED: Self = Self {
        defer_file: true,
        defer_movie: true,
        defer_resources: true,
    };

    pub const IMMEDIATE: Self = Self {
        defer_file: false,
        defer_movie: false,
        defer_resources: false,
    };
}

/// The external movie container writer.
///
/// Owns the container format; the session only asks for creation and
/// deletion at a path.
pub trait MovieWriter: Send {
    fn create(&mut self, path: &Path, flags: ContainerFlags) -> Result<(), ContainerError>;

    fn delete(&mut self, path: &Path) -> Result<(), ContainerError>;
}
