use serde::{Deserialize, Serialize};

/// Capture session phase.
///
/// Phase transitions:
/// ```text
/// previewing → awaiting_file_choice → recording → completed | cancelled | faulted
///     ↑                  |                              |
///     └──────────────────┴──────────────────────────────┘   (preview always resumes)
///
/// stop() → stopped   (terminal, from any phase)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Previewing,
    AwaitingFileChoice,
    Recording,
    Completed,
    Cancelled,
    Faulted,
    Stopped,
}

impl SessionPhase {
    pub fn is_previewing(&self) -> bool {
        matches!(self, Self::Previewing)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Whether this phase ends a record pass.
    pub fn is_record_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Faulted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_predicates() {
        assert!(SessionPhase::Previewing.is_previewing());
        assert!(SessionPhase::Recording.is_recording());
        assert!(SessionPhase::Stopped.is_stopped());

        assert!(SessionPhase::Completed.is_record_terminal());
        assert!(SessionPhase::Cancelled.is_record_terminal());
        assert!(SessionPhase::Faulted.is_record_terminal());
        assert!(!SessionPhase::Stopped.is_record_terminal());
        assert!(!SessionPhase::Previewing.is_record_terminal());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SessionPhase::AwaitingFileChoice).unwrap();
        assert_eq!(json, "\"awaiting_file_choice\"");
    }
}
