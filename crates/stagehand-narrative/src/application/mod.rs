//! Application layer for narrative orchestration.

pub mod command_handlers;
pub mod query_handlers;
