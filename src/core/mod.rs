//! Core library components.

pub mod bundle;
pub mod config;
pub mod constants;
pub mod environment;
pub mod envfile;
pub mod resolver;
pub mod runner;
pub mod store;
