//! # rbac-core
//!
//! Core types, traits, and utilities for the RBAC admin service layer.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The service error taxonomy
//! - Result type aliases
//! - Core traits (Identifiable, Versioned, Timestamped, Entity, ActiveFlag)
//! - List policies
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod policy;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use policy::*;
