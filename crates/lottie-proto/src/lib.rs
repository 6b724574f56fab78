//! Shared core for lottiescan: configuration, the session model, and the
//! fetch → cache → parse pipeline. No terminal code lives here.

pub mod animation;
pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod platform;
pub mod scan;
pub mod state;
