//! Chat participant

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message sender.
///
/// `is_current_user` mirrors the bubble layout: the local user's bubbles sit
/// on the trailing edge and swap avatar and status sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub is_current_user: bool,
}

impl User {
    pub fn new(name: impl Into<String>, is_current_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            avatar_url: None,
            is_current_user,
        }
    }

    /// The user running this client
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Anyone else in the conversation
    pub fn remote(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}
