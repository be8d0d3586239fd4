//! Shared value types

pub mod models;
