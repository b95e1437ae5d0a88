//! Livescore - backend for a football livescore site
//!
//! Serves fixtures, live scores, standings and predictions fetched from a
//! third-party football API, football news (synced and translated to Thai),
//! and the back-office API for advertisements, users and site settings.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `football`: Football API fetch layer, cache and display shaping
//! - `storage`: Database access (advertisements, news, users, settings)
//! - `services`: Domain services on top of storage
//! - `api`: HTTP services and middleware
//! - `http`: Outbound HTTP transport
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod football;
pub mod http;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
