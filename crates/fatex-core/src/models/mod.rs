//! Data models for the flattening pipeline.

pub mod config;
pub mod record;
