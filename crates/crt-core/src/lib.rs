//! Core console library (config, logging, session channel).

pub mod channel;
pub mod config;
pub mod logging;
