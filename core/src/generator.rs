//! The order generator: wires the RNG bank, catalog pool and synthesizer.
//!
//! ORDER OF WORK (fixed):
//!   1. Build the catalog pool from the catalog stream.
//!   2. Synthesize N records from the order stream, in order.
//!
//! RULES:
//!   - The catalog pool is never mutated after step 1.
//!   - All randomness flows through the RngBank.
//!   - Same seed + same anchor => identical records.

use crate::{
    catalog::CatalogPool,
    clock::GenClock,
    config::GenConfig,
    error::GenResult,
    order::{OrderRecord, OrderSynthesizer},
    rng::{RngBank, StreamSlot},
    text::{CuratedTextFactory, TextFactory},
};

pub struct OrderGenerator {
    pub config: GenConfig,
    pub clock: GenClock,
    pub rng_bank: RngBank,
    catalog: CatalogPool,
    text: Box<dyn TextFactory>,
}

impl OrderGenerator {
    /// Build with the curated zh-CN text backend.
    pub fn new(config: GenConfig, seed: u64, clock: GenClock) -> GenResult<Self> {
        Self::with_text_factory(config, seed, clock, Box::new(CuratedTextFactory))
    }

    /// Build with an explicit text backend.
    pub fn with_text_factory(
        config: GenConfig,
        seed: u64,
        clock: GenClock,
        text: Box<dyn TextFactory>,
    ) -> GenResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(seed);
        let mut catalog_rng = rng_bank.for_stream(StreamSlot::Catalog);
        let catalog = CatalogPool::build(
            config.catalog_size,
            config.synthesis.base_price,
            text.as_ref(),
            &mut catalog_rng,
        );
        log::info!(
            "seed={seed} anchor={} catalog: {} entries",
            clock.anchor,
            catalog.len()
        );
        Ok(Self {
            config,
            clock,
            rng_bank,
            catalog,
            text,
        })
    }

    /// Seeded generator anchored at a fixed instant, for tests.
    pub fn build_test(config: GenConfig, clock: GenClock) -> GenResult<Self> {
        let seed = config.seed.unwrap_or(42);
        Self::new(config, seed, clock)
    }

    pub fn catalog(&self) -> &CatalogPool {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Generate `count` records in generation order. Each call restarts
    /// the order stream, so repeated calls return the same records.
    pub fn generate(&self, count: usize) -> Vec<OrderRecord> {
        let synth = OrderSynthesizer::new(
            &self.catalog,
            &self.config,
            self.clock,
            self.text.as_ref(),
        );
        let mut rng = self.rng_bank.for_stream(StreamSlot::Order);
        let records: Vec<OrderRecord> = (0..count).map(|_| synth.synthesize(&mut rng)).collect();
        log::info!("{}: generated {} records", rng.name, records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenConfig;
    use chrono::NaiveDate;

    fn clock() -> GenClock {
        GenClock::fixed(
            NaiveDate::from_ymd_opt(2025, 10, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        )
    }

    #[test]
    fn generate_is_repeatable() {
        let gen = OrderGenerator::build_test(GenConfig::default_test(), clock()).unwrap();
        assert_eq!(gen.generate(10), gen.generate(10));
    }

    #[test]
    fn catalog_size_follows_config() {
        let gen = OrderGenerator::build_test(GenConfig::default_test(), clock()).unwrap();
        assert_eq!(gen.catalog().len(), 5);
        assert_eq!(gen.seed(), 42);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GenConfig {
            store_names: vec![],
            ..GenConfig::default_test()
        };
        assert!(OrderGenerator::build_test(cfg, clock()).is_err());
    }

    #[test]
    fn widest_accepted_lookback_still_generates() {
        let mut cfg = GenConfig::default_test();
        cfg.synthesis.lookback_days = 1_000_000_000;
        assert!(OrderGenerator::build_test(cfg.clone(), clock()).is_err());

        cfg.synthesis.lookback_days = crate::config::MAX_LOOKBACK_DAYS;
        cfg.synthesis.payment_delay_hours.hi = crate::config::MAX_DELAY_HOURS;
        cfg.synthesis.shipping_delay_hours.hi = crate::config::MAX_DELAY_HOURS;
        let gen = OrderGenerator::build_test(cfg, clock()).unwrap();
        assert_eq!(gen.generate(20).len(), 20);
    }

    #[test]
    fn zero_records_is_empty() {
        let gen = OrderGenerator::build_test(GenConfig::default_test(), clock()).unwrap();
        assert!(gen.generate(0).is_empty());
    }
}
