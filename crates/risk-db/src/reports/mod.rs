//! Risk aggregator: summary views built from repository reads.
//!
//! Each view has a pure shaping function over already-fetched records and a
//! `RiskService` method that fetches the records and calls it.

pub mod by_country;
pub mod dashboard;
pub mod heatmap;
pub mod risk_detail;
