//! Domain layer for characters.

pub mod character;
pub mod properties;
