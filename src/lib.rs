pub mod cache;
pub mod commands;
pub mod config;
pub mod controller;
pub mod data_provider;
pub mod error;
pub mod fixtures;
pub mod stats;
pub mod table_model;
pub mod team_abbrev;
pub mod tui;

#[cfg(any(test, feature = "development"))]
pub mod dev;
