//! Core business logic for Recivo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain calculations, validation rules, and collaborator interface types
//! live here.
//!
//! # Modules
//!
//! - `analysis` - Interface types produced by the document-analysis collaborator
//! - `receipt` - Line pricing, period bucketing, and construction-time validation

pub mod analysis;
pub mod receipt;
