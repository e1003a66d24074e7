//! Leadwatch terminal front end: configuration, dispatcher and effect runner.
pub mod platform;
