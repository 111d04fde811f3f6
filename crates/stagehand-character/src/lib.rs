//! Stagehand — Characters.
//!
//! The long-lived player entity: the state gating expressions read, a typed
//! property bag for engine bookkeeping, and the stage the character
//! currently sees.

pub mod domain;
pub mod repository;

pub use domain::character::Character;
pub use domain::properties::CharacterProperties;
pub use repository::CharacterRepository;
