//! Regional and platform sales summaries over exported orders.
//!
//! Only the data side of the sales dashboards lives here: window filtering,
//! province → region mapping, per-region quantity totals and per-platform
//! distinct order counts, each with the mean attached and exportable as CSV.

use crate::{
    error::{GenError, GenResult},
    export::write_bom_csv,
    order::OrderRecord,
    types::Timestamp,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// Fallback region for provinces missing from the table.
pub const OTHER_REGION: &str = "其他";

/// Report order for region totals.
pub const REGION_ORDER: [&str; 8] = [
    "华北", "华南", "华中", "东北", "西北", "西南", "华东", OTHER_REGION,
];

pub const REGION_HEADER: [&str; 3] = ["region", "quantity", "平均值"];
pub const PLATFORM_HEADER: [&str; 3] = ["platform", "orders", "平均值"];

const REGION_TABLE: &[(&str, &str)] = &[
    ("北京市", "华北"),
    ("天津市", "华北"),
    ("河北省", "华北"),
    ("山西省", "华北"),
    ("内蒙古自治区", "华北"),
    ("山东省", "华东"),
    ("江苏省", "华东"),
    ("安徽省", "华东"),
    ("浙江省", "华东"),
    ("福建省", "华东"),
    ("江西省", "华东"),
    ("上海市", "华东"),
    ("台湾省", "华东"),
    ("广东省", "华南"),
    ("广西壮族自治区", "华南"),
    ("海南省", "华南"),
    ("香港特别行政区", "华南"),
    ("澳门特别行政区", "华南"),
    ("河南省", "华中"),
    ("湖北省", "华中"),
    ("湖南省", "华中"),
    ("辽宁省", "东北"),
    ("吉林省", "东北"),
    ("黑龙江省", "东北"),
    ("四川省", "西南"),
    ("重庆市", "西南"),
    ("贵州省", "西南"),
    ("云南省", "西南"),
    ("西藏自治区", "西南"),
    ("陕西省", "西北"),
    ("甘肃省", "西北"),
    ("青海省", "西北"),
    ("宁夏回族自治区", "西北"),
    ("新疆维吾尔自治区", "西北"),
];

/// Sales region of a province, `其他` when unknown.
pub fn region_of(province: &str) -> &'static str {
    REGION_TABLE
        .iter()
        .find(|(p, _)| *p == province)
        .map(|(_, region)| *region)
        .unwrap_or(OTHER_REGION)
}

/// Platforms tracked by the platform dashboard, in report order.
pub fn default_target_platforms() -> Vec<String> {
    ["拼多多", "抖音", "小红书", "京东", "天猫", "得物", "淘宝"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Shipping-date window `[start 00:00:00, end 00:00:00]`, both bounds
/// inclusive. Rows shipped later on the end date fall outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> GenResult<Self> {
        if start > end {
            return Err(GenError::InvalidConfig {
                reason: format!("summary window starts after it ends: {start} > {end}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> GenResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start.and_time(NaiveTime::MIN) && ts <= self.end.and_time(NaiveTime::MIN)
    }
}

fn parse_date(raw: &str) -> GenResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| GenError::InvalidDate {
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionQuantity {
    pub region: String,
    pub quantity: u64,
    #[serde(rename = "平均值")]
    pub average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformOrders {
    pub platform: String,
    pub orders: u64,
    #[serde(rename = "平均值")]
    pub average: f64,
}

/// Records whose shipping date falls inside the window. Unshipped rows
/// never match.
pub fn shipped_within<'a>(
    records: &'a [OrderRecord],
    window: &'a DateWindow,
) -> impl Iterator<Item = &'a OrderRecord> + 'a {
    records
        .iter()
        .filter(move |r| r.shipping_date.is_some_and(|ts| window.contains(ts)))
}

/// Quantity shipped per region, every region present, in `REGION_ORDER`.
pub fn region_quantities(
    records: &[OrderRecord],
    window: &DateWindow,
) -> Vec<RegionQuantity> {
    let mut totals = [0u64; REGION_ORDER.len()];
    for r in shipped_within(records, window) {
        let region = region_of(&r.province);
        if let Some(slot) = REGION_ORDER.iter().position(|name| *name == region) {
            totals[slot] += u64::from(r.quantity);
        }
    }
    let average = mean(&totals);
    REGION_ORDER
        .iter()
        .zip(totals)
        .map(|(region, quantity)| RegionQuantity {
            region: (*region).to_string(),
            quantity,
            average,
        })
        .collect()
}

/// Distinct internal order numbers per target platform, in target order.
/// Platforms outside `targets` are ignored; missing ones report zero.
pub fn platform_order_counts(
    records: &[OrderRecord],
    window: &DateWindow,
    targets: &[String],
) -> Vec<PlatformOrders> {
    let mut seen: Vec<HashSet<&str>> = vec![HashSet::new(); targets.len()];
    for r in shipped_within(records, window) {
        if let Some(slot) = targets.iter().position(|p| *p == r.platform) {
            seen[slot].insert(r.internal_order_number.as_str());
        }
    }
    let counts: Vec<u64> = seen.iter().map(|s| s.len() as u64).collect();
    let average = mean(&counts);
    targets
        .iter()
        .zip(counts)
        .map(|(platform, orders)| PlatformOrders {
            platform: platform.clone(),
            orders,
            average,
        })
        .collect()
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

/// Both dashboard tables for one window.
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub window: DateWindow,
    pub regions: Vec<RegionQuantity>,
    pub platforms: Vec<PlatformOrders>,
}

impl SalesSummary {
    pub fn compute(records: &[OrderRecord], window: DateWindow, targets: &[String]) -> Self {
        let summary = Self {
            regions: region_quantities(records, &window),
            platforms: platform_order_counts(records, &window, targets),
            window,
        };
        log::debug!(
            "summary {}..={}: {} shipped rows",
            window.start,
            window.end,
            shipped_within(records, &summary.window).count()
        );
        summary
    }

    /// Region with the largest total, first in report order on ties.
    pub fn top_region(&self) -> Option<&RegionQuantity> {
        self.regions
            .iter()
            .fold(None, |best: Option<&RegionQuantity>, r| match best {
                Some(b) if b.quantity >= r.quantity => Some(b),
                _ => Some(r),
            })
    }

    pub fn write_regions(&self, path: &Path) -> GenResult<()> {
        write_bom_csv(path, &REGION_HEADER, &self.regions)
    }

    pub fn write_platforms(&self, path: &Path) -> GenResult<()> {
        write_bom_csv(path, &PLATFORM_HEADER, &self.platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn known_and_unknown_provinces() {
        assert_eq!(region_of("广东省"), "华南");
        assert_eq!(region_of("台湾省"), "华东");
        assert_eq!(region_of("火星"), OTHER_REGION);
    }

    #[test]
    fn window_ends_at_midnight_of_end_date() {
        let w = DateWindow::parse("2025-06-01", "2025-12-31").unwrap();
        assert!(w.contains(date(2025, 6, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(w.contains(date(2025, 12, 30).and_hms_opt(23, 59, 59).unwrap()));
        assert!(w.contains(date(2025, 12, 31).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!w.contains(date(2025, 12, 31).and_hms_opt(15, 0, 0).unwrap()));
        assert!(!w.contains(date(2025, 12, 31).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!w.contains(date(2025, 5, 31).and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn inverted_window_rejected() {
        assert!(DateWindow::new(date(2025, 7, 1), date(2025, 6, 1)).is_err());
    }

    #[test]
    fn bad_date_reports_value() {
        let err = DateWindow::parse("2025-13-01", "2025-12-31").unwrap_err();
        assert!(matches!(err, GenError::InvalidDate { ref value } if value == "2025-13-01"));
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1, 2, 3]), 2.0);
    }
}
