//! Stockroom - A small token-guarded product catalog
//!
//! This library provides the core functionality for the Stockroom catalog API.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
