//! Stagehand — what a character currently sees and can do.
//!
//! A [`Stage`] is rebuilt from scratch on every render; its
//! [`ActionGroup`]s and [`Action`]s have no identity beyond the render that
//! produced them.

pub mod action;
pub mod attachment;
pub mod parameters;
pub mod stage;

pub use action::{Action, ActionGroup};
pub use attachment::Attachment;
pub use stage::Stage;
