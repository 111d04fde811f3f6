//! Scene graph domain types.

pub mod connection;
pub mod ids;
pub mod scene;
