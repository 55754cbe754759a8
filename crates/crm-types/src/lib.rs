//! Shared type definitions for the CRM reports API.
//!
//! This crate is the single source of truth for the record shapes the API
//! serves. Types flow downstream to `TypeScript` via `ts-rs` for dashboard
//! consumers.
//!
//! # Modules
//!
//! - [`descriptor`] -- [`EntityDescriptor`], [`FieldSpec`] and the [`Entity`] trait
//! - [`records`] -- The five report record types and their descriptors

pub mod descriptor;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use descriptor::{Entity, EntityDescriptor, FieldDefault, FieldKind, FieldSpec};
pub use records::{
    ALL_DESCRIPTORS, DEFAULT_DEAL_STATUS, Deal, Lead, ResumeCloseDeals, ResumeLead, TotalDeals,
};
