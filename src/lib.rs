pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod donations;
pub mod error;
pub mod memory;
pub mod payments;
pub mod state;
pub mod telemetry;
pub mod ui;
