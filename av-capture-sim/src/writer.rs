//! Scripted movie container writer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use av_capture_core::{ContainerError, ContainerFlags, MovieWriter};

#[derive(Debug, Default)]
pub struct WriterState {
    pub created: Vec<(PathBuf, ContainerFlags)>,
    pub deleted: Vec<PathBuf>,
    pub fail_create: Option<String>,
    pub fail_delete: Option<String>,
}

/// Inspection handle onto a [`SimMovieWriter`]'s shared state.
#[derive(Clone)]
pub struct SimMovieWriterHandle {
    state: Arc<Mutex<WriterState>>,
}

impl SimMovieWriterHandle {
    pub fn state(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock()
    }

    pub fn created_paths(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .created
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn deleted_paths(&self) -> Vec<PathBuf> {
        self.state.lock().deleted.clone()
    }
}

/// Container writer that only records what it was asked to do.
#[derive(Default)]
pub struct SimMovieWriter {
    state: Arc<Mutex<WriterState>>,
}

impl SimMovieWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> SimMovieWriterHandle {
        SimMovieWriterHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn fail_creation(&self, message: impl Into<String>) {
        self.state.lock().fail_create = Some(message.into());
    }

    pub fn fail_deletion(&self, message: impl Into<String>) {
        self.state.lock().fail_delete = Some(message.into());
    }
}

impl MovieWriter for SimMovieWriter {
    fn create(&mut self, path: &Path, flags: ContainerFlags) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        if let Some(message) = state.fail_create.clone() {
            return Err(ContainerError::Create(message));
        }
        state.created.push((path.to_path_buf(), flags));
        Ok(())
    }

    fn delete(&mut self, path: &Path) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        if let Some(message) = state.fail_delete.clone() {
            return Err(ContainerError::Delete(message));
        }
        state.deleted.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_creations_and_deletions() {
        let mut writer = SimMovieWriter::new();
        let handle = writer.handle();

        writer
            .create(Path::new("/tmp/a.mov"), ContainerFlags::DEFERRED)
            .unwrap();
        writer.delete(Path::new("/tmp/old.mov")).unwrap();

        assert_eq!(handle.created_paths(), vec![PathBuf::from("/tmp/a.mov")]);
        assert_eq!(handle.deleted_paths(), vec![PathBuf::from("/tmp/old.mov")]);
        assert_eq!(handle.state().created[0].1, ContainerFlags::DEFERRED);
    }

    #[test]
    fn scripted_creation_failure() {
        let mut writer = SimMovieWriter::new();
        writer.fail_creation("volume locked");

        let err = writer
            .create(Path::new("/tmp/a.mov"), ContainerFlags::DEFERRED)
            .unwrap_err();
        assert_eq!(err, ContainerError::Create("volume locked".into()));
        assert!(writer.handle().created_paths().is_empty());
    }
}
