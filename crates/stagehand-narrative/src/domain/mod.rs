//! Domain layer for narrative orchestration.

pub mod commands;
pub mod new_day;
pub mod renderer;
