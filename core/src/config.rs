use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};

/// Default output file name.
pub const OUTPUT_CSV: &str = "fake_orders.csv";
/// Default number of order rows per run.
pub const GENERATE_NUM: usize = 1000;
/// Default number of SKU catalog entries.
pub const CATALOG_SIZE: usize = 200;

/// Longest order-time lookback a config may ask for (about a century).
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;
/// Longest payment or shipping delay, one year in hours.
pub const MAX_DELAY_HOURS: i64 = 8_760;
/// Largest catalog pool. SKU codes carry six hex chars and must stay unique.
pub const MAX_CATALOG_SIZE: usize = 100_000;

// ── Value sets ─────────────────────────────────────────────────────

pub fn default_platforms() -> Vec<String> {
    ["淘宝", "天猫", "京东", "抖音", "得物", "小红书", "拼多多"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_order_statuses() -> Vec<String> {
    ["已发货", "已签收", "已完成"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_store_names() -> Vec<String> {
    ["安娜旗舰店", "安娜直播店", "安娜奥莱店", "安娜分销店"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ── Numeric ranges ─────────────────────────────────────────────────

/// Multiplicative factor range `[lo, hi]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FactorRange {
    pub lo: f64,
    pub hi: f64,
}

impl FactorRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }
}

/// Integer range `[lo, hi]`, both ends inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntRange {
    pub lo: i64,
    pub hi: i64,
}

impl IntRange {
    pub const fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }
}

/// Pricing and timing knobs of the record synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisParams {
    pub base_price: IntRange,
    pub quantity: IntRange,
    pub unit_price_factor: FactorRange,
    pub payable_factor: FactorRange,
    pub paid_factor: FactorRange,
    /// `unit_price / factor` gives the inflated original price.
    pub original_price_divisor: FactorRange,
    pub gift_probability: f64,
    pub lookback_days: i64,
    pub min_age_days: i64,
    pub payment_delay_hours: IntRange,
    pub shipping_delay_hours: IntRange,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            base_price: IntRange::new(99, 999),
            quantity: IntRange::new(1, 3),
            unit_price_factor: FactorRange::new(0.7, 1.3),
            payable_factor: FactorRange::new(0.8, 1.0),
            paid_factor: FactorRange::new(0.95, 1.0),
            original_price_divisor: FactorRange::new(0.6, 0.95),
            gift_probability: 0.5,
            lookback_days: 180,
            min_age_days: 1,
            payment_delay_hours: IntRange::new(0, 24),
            shipping_delay_hours: IntRange::new(6, 72),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenConfig {
    pub output_csv: String,
    pub generate_num: usize,
    pub catalog_size: usize,
    /// Master seed. `None` lets the runner pick one from the wall clock.
    pub seed: Option<u64>,
    pub platforms: Vec<String>,
    pub order_statuses: Vec<String>,
    pub store_names: Vec<String>,
    pub synthesis: SynthesisParams,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            output_csv: OUTPUT_CSV.into(),
            generate_num: GENERATE_NUM,
            catalog_size: CATALOG_SIZE,
            seed: None,
            platforms: default_platforms(),
            order_statuses: default_order_statuses(),
            store_names: default_store_names(),
            synthesis: SynthesisParams::default(),
        }
    }
}

impl GenConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    /// In tests, use GenConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GenConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!("loaded config from {path}");
        Ok(config)
    }

    /// Small, seeded config for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            generate_num: 10,
            catalog_size: 5,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Reject configs the generator cannot draw from.
    pub fn validate(&self) -> GenResult<()> {
        if self.catalog_size == 0 || self.catalog_size > MAX_CATALOG_SIZE {
            return Err(invalid(&format!(
                "catalog_size must be within 1..={MAX_CATALOG_SIZE}"
            )));
        }
        if self.output_csv.trim().is_empty() {
            return Err(invalid("output_csv must not be empty"));
        }
        for (name, set) in [
            ("platforms", &self.platforms),
            ("order_statuses", &self.order_statuses),
            ("store_names", &self.store_names),
        ] {
            if set.is_empty() {
                return Err(invalid(&format!("{name} must not be empty")));
            }
        }

        let s = &self.synthesis;
        for (name, r) in [
            ("base_price", s.base_price),
            ("quantity", s.quantity),
            ("payment_delay_hours", s.payment_delay_hours),
            ("shipping_delay_hours", s.shipping_delay_hours),
        ] {
            if r.lo > r.hi || r.lo < 0 {
                return Err(invalid(&format!("{name} range {}..={} is invalid", r.lo, r.hi)));
            }
        }
        if s.quantity.lo < 1 || s.quantity.hi > i64::from(u32::MAX) {
            return Err(invalid("quantity must lie within 1..=u32::MAX"));
        }
        for (name, r) in [
            ("payment_delay_hours", s.payment_delay_hours),
            ("shipping_delay_hours", s.shipping_delay_hours),
        ] {
            if r.hi > MAX_DELAY_HOURS {
                return Err(invalid(&format!("{name} must not exceed {MAX_DELAY_HOURS}")));
            }
        }
        for (name, r) in [
            ("unit_price_factor", s.unit_price_factor),
            ("payable_factor", s.payable_factor),
            ("paid_factor", s.paid_factor),
            ("original_price_divisor", s.original_price_divisor),
        ] {
            if !(r.lo > 0.0 && r.lo <= r.hi) {
                return Err(invalid(&format!("{name} range [{}, {}] is invalid", r.lo, r.hi)));
            }
        }
        if s.payable_factor.hi > 1.0 || s.paid_factor.hi > 1.0 {
            return Err(invalid("discount factors must not exceed 1.0"));
        }
        if !(0.0..=1.0).contains(&s.gift_probability) {
            return Err(invalid("gift_probability must be within [0, 1]"));
        }
        if s.min_age_days < 0 || s.lookback_days <= s.min_age_days {
            return Err(invalid("lookback_days must exceed min_age_days"));
        }
        if s.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(invalid(&format!(
                "lookback_days must not exceed {MAX_LOOKBACK_DAYS}"
            )));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> GenError {
    GenError::InvalidConfig {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = GenConfig::default();
        assert_eq!(cfg.output_csv, "fake_orders.csv");
        assert_eq!(cfg.generate_num, 1000);
        assert_eq!(cfg.catalog_size, 200);
        assert_eq!(cfg.platforms.len(), 7);
        assert_eq!(cfg.order_statuses.len(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GenConfig =
            serde_json::from_str(r#"{ "generate_num": 25, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.generate_num, 25);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.catalog_size, CATALOG_SIZE);
        assert_eq!(cfg.synthesis, SynthesisParams::default());
    }

    #[test]
    fn empty_platform_set_rejected() {
        let cfg = GenConfig {
            platforms: vec![],
            ..GenConfig::default_test()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("platforms"), "{err}");
    }

    #[test]
    fn zero_catalog_rejected() {
        let cfg = GenConfig {
            catalog_size: 0,
            ..GenConfig::default_test()
        };
        assert!(matches!(cfg.validate(), Err(GenError::InvalidConfig { .. })));
    }

    #[test]
    fn discount_above_one_rejected() {
        let mut cfg = GenConfig::default_test();
        cfg.synthesis.paid_factor = FactorRange::new(0.9, 1.1);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_lookback_rejected() {
        let mut cfg = GenConfig::default_test();
        cfg.synthesis.lookback_days = 1_000_000_000;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("lookback_days"), "{err}");

        cfg.synthesis.lookback_days = MAX_LOOKBACK_DAYS;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn oversized_delays_rejected() {
        let mut cfg = GenConfig::default_test();
        cfg.synthesis.payment_delay_hours = IntRange::new(0, i64::MAX / 2);
        assert!(cfg.validate().unwrap_err().to_string().contains("payment_delay_hours"));

        let mut cfg = GenConfig::default_test();
        cfg.synthesis.shipping_delay_hours = IntRange::new(6, MAX_DELAY_HOURS + 1);
        assert!(cfg.validate().unwrap_err().to_string().contains("shipping_delay_hours"));
    }

    #[test]
    fn quantity_beyond_u32_rejected() {
        let mut cfg = GenConfig::default_test();
        cfg.synthesis.quantity = IntRange::new(1, i64::from(u32::MAX) + 1);
        assert!(matches!(cfg.validate(), Err(GenError::InvalidConfig { .. })));
    }

    #[test]
    fn oversized_catalog_rejected() {
        let cfg = GenConfig {
            catalog_size: MAX_CATALOG_SIZE + 1,
            ..GenConfig::default_test()
        };
        assert!(matches!(cfg.validate(), Err(GenError::InvalidConfig { .. })));
    }

    #[test]
    fn load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.json");
        std::fs::write(&path, r#"{ "catalog_size": 12, "platforms": ["淘宝"] }"#).unwrap();

        let cfg = GenConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.catalog_size, 12);
        assert_eq!(cfg.platforms, vec!["淘宝".to_string()]);
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = GenConfig::load("/nonexistent/gen.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gen.json"), "{err}");
    }
}
