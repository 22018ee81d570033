//! # risk-core
//!
//! Core types shared by every crate of the risk reporting API.
//!
//! This crate provides:
//! - Entity records for the reference data and the risk register
//!   (roles, countries, users, risks, controls, action plans, comments)
//! - Summary view types produced by the risk aggregator
//! - Typed listing filters and their validation
//! - The ordinal likelihood × impact scale used by the heatmap
//! - Cross-cutting error types
//!
//! Nothing here performs I/O.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filters;
pub mod responses;
pub mod scale;
