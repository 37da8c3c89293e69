//! order-gen-core: synthetic e-commerce order generation.
//!
//! A run builds an immutable SKU catalog pool, synthesizes N internally
//! consistent order records from it and exports them as UTF-8 (BOM) CSV.
//! `summary` turns an exported batch into the regional and platform sales
//! tables used by the dashboards.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod order;
pub mod rng;
pub mod summary;
pub mod text;
pub mod types;
