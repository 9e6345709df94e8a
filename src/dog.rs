//! Dog record - the single entity mapped by Kennel
//!
//! A `Dog` is built in memory without an id. The id is assigned by the
//! store on first insert and never changes afterwards.

use serde::{Deserialize, Serialize};

/// Persistence state of a dog, derived from whether it has an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Never inserted
    Unpersisted,
    /// Inserted with the given row id
    Persisted(i64),
}

impl RecordState {
    pub fn is_persisted(&self) -> bool {
        matches!(self, RecordState::Persisted(_))
    }
}

/// A dog record.
///
/// `color` and `instagram` only exist in the full schema; under the basic
/// schema they are neither written nor read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Row id, assigned by the store
    id: Option<i64>,
    pub name: String,
    pub color: Option<String>,
    pub breed: String,
    /// Instagram handle
    pub instagram: Option<String>,
}

impl Dog {
    /// Create a new, unpersisted dog
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
            breed: breed.into(),
            instagram: None,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the instagram handle
    pub fn with_instagram(mut self, instagram: impl Into<String>) -> Self {
        self.instagram = Some(instagram.into());
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn state(&self) -> RecordState {
        match self.id {
            Some(id) => RecordState::Persisted(id),
            None => RecordState::Unpersisted,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.state().is_persisted()
    }

    /// Only the storage layer assigns ids (on insert and on hydration).
    pub(crate) fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    /// Get a short description for display
    pub fn short_description(&self) -> String {
        let id = self
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "#new".to_string());
        match &self.color {
            Some(color) => format!("{} {} ({}, {})", id, self.name, color, self.breed),
            None => format!("{} {} ({})", id, self.name, self.breed),
        }
    }
}

impl std::fmt::Display for Dog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dog_has_no_id() {
        let dog = Dog::new("Fido", "lab");
        assert_eq!(dog.name, "Fido");
        assert_eq!(dog.breed, "lab");
        assert_eq!(dog.id(), None);
        assert_eq!(dog.state(), RecordState::Unpersisted);
        assert!(!dog.is_persisted());
    }

    #[test]
    fn test_builder_sets_optional_fields() {
        let dog = Dog::new("Teddy", "cockapoo")
            .with_color("brown")
            .with_instagram("@teddy");
        assert_eq!(dog.color.as_deref(), Some("brown"));
        assert_eq!(dog.instagram.as_deref(), Some("@teddy"));
    }

    #[test]
    fn test_state_follows_id() {
        let mut dog = Dog::new("Teddy", "cockapoo");
        dog.set_id(Some(7));
        assert_eq!(dog.state(), RecordState::Persisted(7));
        assert!(dog.is_persisted());
    }

    #[test]
    fn test_short_description() {
        let mut dog = Dog::new("Teddy", "cockapoo");
        assert_eq!(dog.short_description(), "#new Teddy (cockapoo)");

        dog.set_id(Some(1));
        dog.color = Some("brown".to_string());
        assert_eq!(dog.to_string(), "#1 Teddy (brown, cockapoo)");
    }
}
