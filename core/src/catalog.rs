//! SKU catalog pool.
//!
//! Built once per run from the catalog stream and never mutated afterwards.
//! Every order line references exactly one entry, so the SKU, SPU, name,
//! color/spec and base price of a record always agree. SKU codes are unique
//! within a pool.

use crate::{
    config::IntRange,
    rng::StreamRng,
    text::{short_token, TextFactory},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub sku: String,
    pub spu: String,
    pub product_name: String,
    pub color_and_spec: String,
    pub color: String,
    pub base_price: i64,
}

impl CatalogEntry {
    fn matches(&self, sku: &str, spu: &str, product_name: &str, color_and_spec: &str) -> bool {
        self.sku == sku
            && self.spu == spu
            && self.product_name == product_name
            && self.color_and_spec == color_and_spec
    }
}

#[derive(Debug, Clone)]
pub struct CatalogPool {
    entries: Vec<CatalogEntry>,
}

impl CatalogPool {
    /// Build `size` entries with base prices drawn from `base_price`.
    pub fn build(
        size: usize,
        base_price: IntRange,
        text: &dyn TextFactory,
        rng: &mut StreamRng,
    ) -> Self {
        let mut entries = Vec::with_capacity(size);
        let mut skus = HashSet::with_capacity(size);
        for _ in 0..size {
            let sku = loop {
                let candidate = format!("SKU{}", short_token(text, rng, 6, false));
                if skus.insert(candidate.clone()) {
                    break candidate;
                }
                log::debug!("{}: redrawing duplicate {candidate}", rng.name);
            };
            entries.push(CatalogEntry {
                sku,
                spu: format!("SPU{}", short_token(text, rng, 6, false)),
                product_name: text.product_phrase(rng),
                color_and_spec: text.color_name(rng),
                color: text.color_name(rng),
                base_price: rng.int_inclusive(base_price.lo, base_price.hi),
            });
        }
        log::debug!("{}: built catalog pool of {size} entries", rng.name);
        Self { entries }
    }

    /// Wrap a fixed set of entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Uniformly choose one entry. The pool is never empty once built from
    /// a validated config.
    pub fn pick(&self, rng: &mut StreamRng) -> &CatalogEntry {
        rng.pick(&self.entries)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry whose SKU, SPU, name and color/spec all match the given values.
    pub fn find_joint(
        &self,
        sku: &str,
        spu: &str,
        product_name: &str,
        color_and_spec: &str,
    ) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.matches(sku, spu, product_name, color_and_spec))
    }

    /// Number of entries matching all four fields.
    pub fn joint_matches(
        &self,
        sku: &str,
        spu: &str,
        product_name: &str,
        color_and_spec: &str,
    ) -> usize {
        self.entries
            .iter()
            .filter(|e| e.matches(sku, spu, product_name, color_and_spec))
            .count()
    }
}
