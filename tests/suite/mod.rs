//! Integration test modules

mod config;
mod properties;
mod render;
mod scenario;
