//! CLI definition and handlers

pub mod commands;
pub mod handlers;
