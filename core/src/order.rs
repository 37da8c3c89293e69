//! Order records and the single-record synthesizer.

use crate::{
    catalog::CatalogPool,
    clock::GenClock,
    config::{FactorRange, GenConfig},
    rng::StreamRng,
    text::{short_token, TextFactory},
    types::{round2, Amount, Quantity, Timestamp},
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Sub-order status carried on every row.
pub const SUB_ORDER_STATUS_NORMAL: &str = "正常";

/// Exported column names, in file order.
pub const COLUMNS: [&str; 30] = [
    "internal_order_number",
    "online_order_number",
    "store_name",
    "full_channel_user_id",
    "shipping_date",
    "payment_date",
    "payable_amount",
    "paid_amount",
    "status",
    "consignee",
    "spu",
    "order_time",
    "province",
    "city",
    "platform",
    "sub_order_number",
    "online_sub_order_number",
    "original_online_order_number",
    "sku",
    "quantity",
    "unit_price",
    "product_name",
    "color_and_spec",
    "product_amount",
    "original_price",
    "is_gift",
    "sub_order_status",
    "refund_status",
    "registered_quantity",
    "actual_refund_quantity",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RefundStatus {
    #[serde(rename = "未申请退款")]
    NotRequested,
    #[serde(rename = "申请退款")]
    Requested,
    #[serde(rename = "成功退款")]
    Refunded,
    #[serde(rename = "退款关闭")]
    Closed,
}

impl RefundStatus {
    pub const ALL: [RefundStatus; 4] = [
        RefundStatus::NotRequested,
        RefundStatus::Requested,
        RefundStatus::Refunded,
        RefundStatus::Closed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotRequested => "未申请退款",
            Self::Requested => "申请退款",
            Self::Refunded => "成功退款",
            Self::Closed => "退款关闭",
        }
    }

    /// A fully refunded order never left the warehouse.
    pub fn suppresses_shipping(&self) -> bool {
        matches!(self, Self::Refunded)
    }
}

/// One exported order line. Field order is the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub internal_order_number: String,
    pub online_order_number: String,
    pub store_name: String,
    pub full_channel_user_id: String,
    #[serde(with = "optional_timestamp")]
    pub shipping_date: Option<Timestamp>,
    #[serde(with = "timestamp")]
    pub payment_date: Timestamp,
    pub payable_amount: Amount,
    pub paid_amount: Amount,
    pub status: String,
    pub consignee: String,
    pub spu: String,
    #[serde(with = "timestamp")]
    pub order_time: Timestamp,
    pub province: String,
    pub city: String,
    pub platform: String,
    pub sub_order_number: String,
    pub online_sub_order_number: String,
    pub original_online_order_number: String,
    pub sku: String,
    pub quantity: Quantity,
    pub unit_price: Amount,
    pub product_name: String,
    pub color_and_spec: String,
    pub product_amount: Amount,
    pub original_price: Amount,
    #[serde(with = "gift_flag")]
    pub is_gift: bool,
    pub sub_order_status: String,
    pub refund_status: RefundStatus,
    pub registered_quantity: Quantity,
    pub actual_refund_quantity: Quantity,
}

mod timestamp {
    use crate::types::{Timestamp, TIMESTAMP_FORMAT};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(d)?;
        Timestamp::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod optional_timestamp {
    use crate::types::{Timestamp, TIMESTAMP_FORMAT};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.collect_str(&ts.format(TIMESTAMP_FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => {
                Timestamp::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}

mod gift_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    const YES: &str = "是";
    const NO: &str = "否";

    pub fn serialize<S: Serializer>(flag: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *flag { YES } else { NO })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            YES => Ok(true),
            NO => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "is_gift must be {YES} or {NO}, got '{other}'"
            ))),
        }
    }
}

/// Produces fully-populated order records from an immutable catalog pool.
pub struct OrderSynthesizer<'a> {
    catalog: &'a CatalogPool,
    config: &'a GenConfig,
    clock: GenClock,
    text: &'a dyn TextFactory,
}

impl<'a> OrderSynthesizer<'a> {
    pub fn new(
        catalog: &'a CatalogPool,
        config: &'a GenConfig,
        clock: GenClock,
        text: &'a dyn TextFactory,
    ) -> Self {
        Self {
            catalog,
            config,
            clock,
            text,
        }
    }

    /// Synthesize one record. Pure given the stream state.
    pub fn synthesize(&self, rng: &mut StreamRng) -> OrderRecord {
        let params = &self.config.synthesis;
        let text = self.text;

        let entry = self.catalog.pick(rng);
        let qty = rng.int_inclusive(params.quantity.lo, params.quantity.hi) as Quantity;

        let unit_price = round2(entry.base_price as f64 * draw(rng, params.unit_price_factor));
        let product_amount = round2(unit_price * qty as f64);
        // Rounding can nudge a stage past its predecessor; clamp keeps the chain ordered.
        let payable = round2(product_amount * draw(rng, params.payable_factor)).min(product_amount);
        let paid = round2(payable * draw(rng, params.paid_factor)).min(payable);

        let (window_start, window_end) = self
            .clock
            .order_window(params.lookback_days, params.min_age_days);
        let span = (window_end - window_start).num_seconds();
        let order_time = window_start + Duration::seconds(rng.int_inclusive(0, span));
        let payment_date = order_time
            + Duration::hours(rng.int_inclusive(
                params.payment_delay_hours.lo,
                params.payment_delay_hours.hi,
            ));
        let shipping_date = payment_date
            + Duration::hours(rng.int_inclusive(
                params.shipping_delay_hours.lo,
                params.shipping_delay_hours.hi,
            ));

        let refund = *rng.pick(&RefundStatus::ALL);
        let shipping_date = if refund.suppresses_shipping() {
            None
        } else {
            Some(shipping_date)
        };

        let place = text.place(rng);

        OrderRecord {
            internal_order_number: short_token(text, rng, 18, true),
            online_order_number: format!("OL{}", short_token(text, rng, 18, true)),
            store_name: rng.pick(&self.config.store_names).clone(),
            full_channel_user_id: short_token(text, rng, 20, false),
            shipping_date,
            payment_date,
            payable_amount: payable,
            paid_amount: paid,
            status: rng.pick(&self.config.order_statuses).clone(),
            consignee: text.person_name(rng),
            spu: entry.spu.clone(),
            order_time,
            province: place.province,
            city: place.city,
            platform: rng.pick(&self.config.platforms).clone(),
            sub_order_number: format!("SUB{}", short_token(text, rng, 16, true)),
            online_sub_order_number: format!("ONLINESUB{}", short_token(text, rng, 16, true)),
            original_online_order_number: format!("ORIG{}", short_token(text, rng, 16, true)),
            sku: entry.sku.clone(),
            quantity: qty,
            unit_price,
            product_name: entry.product_name.clone(),
            color_and_spec: entry.color_and_spec.clone(),
            product_amount,
            original_price: round2(unit_price / draw(rng, params.original_price_divisor)),
            is_gift: rng.chance(params.gift_probability),
            sub_order_status: SUB_ORDER_STATUS_NORMAL.into(),
            refund_status: refund,
            registered_quantity: if refund == RefundStatus::Requested { qty } else { 0 },
            actual_refund_quantity: if refund == RefundStatus::Refunded { qty } else { 0 },
        }
    }
}

/// Draw a factor from `[lo, hi)`. A degenerate range yields `lo`.
fn draw(rng: &mut StreamRng, range: FactorRange) -> f64 {
    rng.uniform(range.lo, range.hi)
}
