//! Stagehand — Narrative Orchestration.
//!
//! Turns a character's position in the scene graph into a [`Stage`] of
//! actions, resolves the action a player picks, and interposes the new-day
//! interstitial when enough time has passed.
//!
//! [`Stage`]: stagehand_stage::Stage

pub mod application;
pub mod domain;

pub use application::command_handlers::GameLoop;
pub use domain::new_day::NewDayRule;
pub use domain::renderer::SceneRenderer;
