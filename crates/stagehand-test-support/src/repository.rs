//! Test repositories — `CharacterRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use stagehand_character::{Character, CharacterRepository};
use stagehand_core::error::DomainError;
use uuid::Uuid;

/// A character repository backed by a map. Counts saves so tests can assert
/// whether a handler persisted anything.
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepository {
    characters: Mutex<HashMap<Uuid, Character>>,
    saves: Mutex<usize>,
}

impl InMemoryCharacterRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `character`. The seeding write is
    /// not counted as a save.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_character(character: Character) -> Self {
        let repo = Self::new();
        repo.characters
            .lock()
            .unwrap()
            .insert(character.id, character);
        repo
    }

    /// Returns a copy of the stored character, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get(&self, id: Uuid) -> Option<Character> {
        self.characters.lock().unwrap().get(&id).cloned()
    }

    /// Number of `save` calls so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepository {
    async fn load(&self, id: Uuid) -> Result<Character, DomainError> {
        self.characters
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("character {id}")))
    }

    async fn save(&self, character: &Character) -> Result<(), DomainError> {
        self.characters
            .lock()
            .unwrap()
            .insert(character.id, character.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A character repository whose writes always fail with an infrastructure
/// error. Loads return the configured character, or fail too when none is
/// configured.
#[derive(Debug, Default)]
pub struct FailingCharacterRepository {
    character: Option<Character>,
}

impl FailingCharacterRepository {
    /// A repository where every call fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that loads `character` but refuses to save.
    #[must_use]
    pub fn with_character(character: Character) -> Self {
        Self {
            character: Some(character),
        }
    }
}

#[async_trait]
impl CharacterRepository for FailingCharacterRepository {
    async fn load(&self, _id: Uuid) -> Result<Character, DomainError> {
        self.character
            .clone()
            .ok_or_else(|| DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _character: &Character) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
