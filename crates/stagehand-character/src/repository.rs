//! Character persistence port.

use async_trait::async_trait;
use stagehand_core::error::DomainError;
use uuid::Uuid;

use crate::domain::character::Character;

/// Loads and stores characters together with their current stage.
///
/// Implementations propagate storage failures as
/// `DomainError::Infrastructure` and never retry.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Loads a character.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no character has this id.
    async fn load(&self, id: Uuid) -> Result<Character, DomainError>;

    /// Stores a character, replacing any previous copy. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the write fails.
    async fn save(&self, character: &Character) -> Result<(), DomainError>;
}
