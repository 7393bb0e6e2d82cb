use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The four flags the presentation layer observes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatus {
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Message of the most recent failed save; cleared when the next save starts.
    pub save_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Clean,
    Dirty,
    Saving,
    Error,
}

impl SaveStatus {
    pub fn state(&self) -> SaveState {
        if self.is_saving {
            SaveState::Saving
        } else if self.save_error.is_some() {
            SaveState::Error
        } else if self.has_unsaved_changes {
            SaveState::Dirty
        } else {
            SaveState::Clean
        }
    }
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SaveState::Clean => "saved",
            SaveState::Dirty => "unsaved changes",
            SaveState::Saving => "saving",
            SaveState::Error => "save failed",
        };
        write!(f, "{}", label)
    }
}
