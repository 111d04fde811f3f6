//! Character storage for a single terminal session.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use stagehand_character::{Character, CharacterRepository};
use stagehand_core::error::DomainError;
use uuid::Uuid;

/// Keeps the session's characters in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct SessionCharacters {
    characters: Mutex<HashMap<Uuid, Character>>,
}

impl SessionCharacters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Character>>, DomainError> {
        self.characters
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("session store poisoned: {e}")))
    }
}

#[async_trait]
impl CharacterRepository for SessionCharacters {
    async fn load(&self, id: Uuid) -> Result<Character, DomainError> {
        self.lock()?
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("character {id}")))
    }

    async fn save(&self, character: &Character) -> Result<(), DomainError> {
        self.lock()?.insert(character.id, character.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = SessionCharacters::new();
        let character = Character::new(Uuid::new_v4(), "Alaric");

        repo.save(&character).await.unwrap();

        assert_eq!(repo.load(character.id).await.unwrap(), character);
    }

    #[tokio::test]
    async fn test_load_unknown_is_not_found() {
        let repo = SessionCharacters::new();

        let result = repo.load(Uuid::new_v4()).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
