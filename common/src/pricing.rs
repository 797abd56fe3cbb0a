//! Deterministic offline price estimation.
//!
//! This is the fallback path behind the AI estimator: whenever the external
//! service is unavailable, fails, or returns something unparseable, pricing
//! degrades to this arithmetic and never surfaces an error to the user.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Base price (INR per quintal) when the rice type matches nothing.
pub const DEFAULT_BASE_PRICE_INR: f64 = 5000.0;

/// Base prices per quintal, matched case-insensitively by substring.
const BASE_PRICES: &[(&str, f64)] = &[
    ("sona masoori", 5500.0),
    ("sonamasoori", 5500.0),
    ("basmati", 9000.0),
    ("kolam", 6000.0),
    ("brown", 6500.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub rice_type: String,
    /// Quantity in kilograms.
    pub quantity_kg: f64,
    /// Accepted for the AI path; the offline path ignores them.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub total_price_inr: f64,
    pub price_per_quintal_inr: f64,
    pub justification: String,
    pub source: EstimateSource,
}

/// Offline estimate using the current calendar month.
pub fn estimate(req: &EstimateRequest) -> PriceEstimate {
    estimate_for_month(req, Utc::now().month())
}

/// Offline estimate for a given month (1-12). Month is a parameter so tests
/// can pin the seasonal multiplier.
pub fn estimate_for_month(req: &EstimateRequest, month: u32) -> PriceEstimate {
    let base = base_price(&req.rice_type);
    let seasonal = 1.0 + (month % 3) as f64 * 0.05;
    let per_quintal = base * seasonal;
    let total = per_quintal * req.quantity_kg / 100.0;
    PriceEstimate {
        total_price_inr: total,
        price_per_quintal_inr: per_quintal,
        justification: format!(
            "Offline estimate: base price {base:.0} INR/quintal for {}, seasonal multiplier {seasonal:.2}",
            req.rice_type,
        ),
        source: EstimateSource::Fallback,
    }
}

fn base_price(rice_type: &str) -> f64 {
    let needle = rice_type.to_lowercase();
    BASE_PRICES
        .iter()
        .find(|(key, _)| needle.contains(key))
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_BASE_PRICE_INR)
}
