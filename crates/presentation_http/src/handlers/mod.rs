//! HTTP request handlers

pub mod health;
pub mod languages;
pub mod samples;
pub mod synthesize;
