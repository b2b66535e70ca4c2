use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{de, id};

/// A free-text note on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default = "Uuid::new_v4", deserialize_with = "id::lenient")]
    pub id: Uuid,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub text: String,
}

impl Note {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            text: String::new(),
        }
    }

    /// Same note identity with different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            id: self.id,
            text: text.into(),
        }
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}
