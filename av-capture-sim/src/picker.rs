//! Scripted save-file prompt.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use av_capture_core::{FilePickError, FilePicker, SaveTarget};

#[derive(Debug, Default)]
pub struct PickerState {
    pub responses: VecDeque<Result<SaveTarget, FilePickError>>,
    /// `(prompt, default_name)` pairs, in the order they were shown.
    pub prompts: Vec<(String, String)>,
}

/// Inspection handle onto a [`ScriptedPicker`]'s shared state.
#[derive(Clone)]
pub struct ScriptedPickerHandle {
    state: Arc<Mutex<PickerState>>,
}

impl ScriptedPickerHandle {
    pub fn state(&self) -> MutexGuard<'_, PickerState> {
        self.state.lock()
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.state.lock().prompts.clone()
    }
}

/// File picker that answers prompts from a queue.
///
/// An exhausted queue answers with cancellation, the safe default.
#[derive(Default)]
pub struct ScriptedPicker {
    state: Arc<Mutex<PickerState>>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScriptedPickerHandle {
        ScriptedPickerHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn push_selection(&self, path: impl Into<PathBuf>, replace_existing: bool) {
        self.state.lock().responses.push_back(Ok(SaveTarget {
            path: path.into(),
            replace_existing,
        }));
    }

    pub fn push_cancel(&self) {
        self.state
            .lock()
            .responses
            .push_back(Err(FilePickError::Cancelled));
    }
}

impl FilePicker for ScriptedPicker {
    fn put_file(&mut self, prompt: &str, default_name: &str) -> Result<SaveTarget, FilePickError> {
        let mut state = self.state.lock();
        state.prompts.push((prompt.into(), default_name.into()));
        state
            .responses
            .pop_front()
            .unwrap_or(Err(FilePickError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order_then_cancels() {
        let mut picker = ScriptedPicker::new();
        picker.push_selection("/tmp/a.mov", false);
        picker.push_cancel();

        let first = picker.put_file("Save movie as:", "untitled.mov").unwrap();
        assert_eq!(first.path, PathBuf::from("/tmp/a.mov"));
        assert!(!first.replace_existing);

        assert_eq!(
            picker.put_file("Save movie as:", "untitled.mov"),
            Err(FilePickError::Cancelled)
        );
        // queue exhausted
        assert_eq!(
            picker.put_file("Save movie as:", "untitled.mov"),
            Err(FilePickError::Cancelled)
        );

        assert_eq!(picker.handle().prompts().len(), 3);
    }
}
