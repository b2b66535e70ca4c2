use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{de, id, Image, Note};

/// A page holding notes and images in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default = "Uuid::new_v4", deserialize_with = "id::lenient")]
    pub id: Uuid,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub notes: Vec<Note>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub images: Vec<Arc<Image>>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            notes: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.notes.is_empty() && self.images.is_empty()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
