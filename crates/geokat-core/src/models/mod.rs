//! Data models for survey document processing.

pub mod config;
pub mod record;
