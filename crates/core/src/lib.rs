//! Core library: link ranking, configuration, and add/open bookkeeping.

pub mod clock;
pub mod config;
pub mod indexer;
pub mod models;
pub mod scoring;
pub mod search;
