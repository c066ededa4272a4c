//! # AuditRS Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/auditrs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by every
//! AuditRS command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{AuditError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
