//! SafeScan Common - Shared types, utilities, and configuration for SafeScan.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Error types and handling utilities
//! - Logging setup and structured logging helpers

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    Config, LlmConfig, LlmSecretsConfig, NetworkConfig, ObservabilityConfig, SecretsConfig,
    ServicesConfig,
};
pub use error::{Error, Result};
