//! Bridge between the controller and the asynchronous document backend.

pub mod commands;
pub mod runtime;
