//! Pricing engine - order value and delivery fee computation
//!
//! Pure and deterministic: no I/O, no clock. All arithmetic runs on
//! `Decimal` and converts to `f64` only at the edges.
//!
//! The delivery fee is a flat weight-tier schedule. This is a known
//! simplification standing in for a distance/zone-based rate card, and it
//! is the intended behavior - there is deliberately no geodistance input
//! anywhere in this module.
//!
//! Only the assembler and the finalizer call into here; no other component
//! writes `pricing` or `delivery.fee`.

use rust_decimal::prelude::*;
use shared::models::{ItemDetails, PricingSummary};

/// Base callout fee in currency units
const BASE_FEE: i64 = 1_000;
/// Per-kg rate up to the light-band limit
const LIGHT_RATE_PER_KG: i64 = 200;
/// Upper bound of the light band, kg
const LIGHT_BAND_LIMIT_KG: i64 = 5;
/// Per-kg rate above the light band, up to the mid-band limit
const MID_RATE_PER_KG: i64 = 150;
/// Upper bound of the mid band, kg
const MID_BAND_LIMIT_KG: i64 = 20;
/// Full light band: 5 kg x 200
const LIGHT_BAND_FLAT: i64 = 1_000;
/// Full light + mid bands: 1000 + 15 kg x 150
const MID_BAND_FLAT: i64 = 3_250;
/// Per-kg rate above the mid band
const HEAVY_RATE_PER_KG: i64 = 100;

/// Advisory insurance rate on fragile/special-handling declared value
const INSURANCE_RATE_PERCENT: i64 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Total cargo weight in kilograms: Σ item.weight x quantity
pub fn total_weight_kg(items: &[ItemDetails]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|item| to_decimal(item.weight) * Decimal::from(item.quantity))
        .sum();
    to_f64(total)
}

/// Total declared value: Σ item.value x quantity, exact (no rounding)
pub fn total_item_value(items: &[ItemDetails]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|item| to_decimal(item.value) * Decimal::from(item.quantity))
        .sum();
    to_f64(total)
}

/// Tiered delivery fee for a cargo weight, rounded to the nearest whole
/// currency unit.
///
/// Schedule: base 1000; ≤5 kg at 200/kg; 5-20 kg at 150/kg on top of the
/// full light band; above 20 kg at 100/kg on top of both lower bands.
/// Monotonically non-decreasing and continuous at the tier boundaries.
pub fn delivery_fee(total_weight_kg: f64) -> f64 {
    let weight = to_decimal(total_weight_kg.max(0.0));
    let light_limit = Decimal::from(LIGHT_BAND_LIMIT_KG);
    let mid_limit = Decimal::from(MID_BAND_LIMIT_KG);

    let variable = if weight <= light_limit {
        Decimal::from(LIGHT_RATE_PER_KG) * weight
    } else if weight <= mid_limit {
        Decimal::from(LIGHT_BAND_FLAT) + Decimal::from(MID_RATE_PER_KG) * (weight - light_limit)
    } else {
        Decimal::from(MID_BAND_FLAT) + Decimal::from(HEAVY_RATE_PER_KG) * (weight - mid_limit)
    };

    let fee = Decimal::from(BASE_FEE) + variable;
    to_f64(fee.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Recompute the full derived pricing block from scratch
pub fn quote(items: &[ItemDetails]) -> PricingSummary {
    let item_value = total_item_value(items);
    let fee = delivery_fee(total_weight_kg(items));
    PricingSummary {
        item_value,
        delivery_fee: fee,
        total: to_f64(to_decimal(item_value) + to_decimal(fee)),
    }
}

/// Advisory insurance surcharge: 2% of declared value on fragile or
/// special-handling lines, rounded to 2 decimal places.
///
/// Shown to the customer as a suggestion only - never folded into
/// `PricingSummary::total`, which stays item_value + delivery_fee.
pub fn insurance_surcharge(items: &[ItemDetails]) -> f64 {
    let covered: Decimal = items
        .iter()
        .filter(|item| item.is_fragile || item.requires_special_handling)
        .map(|item| to_decimal(item.value) * Decimal::from(item.quantity))
        .sum();
    let surcharge = covered * Decimal::from(INSURANCE_RATE_PERCENT) / Decimal::ONE_HUNDRED;
    to_f64(surcharge.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// Field-wise monetary comparison of two pricing blocks
pub fn pricing_eq(a: &PricingSummary, b: &PricingSummary) -> bool {
    money_eq(a.item_value, b.item_value)
        && money_eq(a.delivery_fee, b.delivery_fee)
        && money_eq(a.total, b.total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(weight: f64, value: f64, quantity: i32) -> ItemDetails {
        ItemDetails {
            name: "Parcel".to_string(),
            category: "General".to_string(),
            subcategory: "Boxed".to_string(),
            quantity,
            weight,
            value,
            dimensions: None,
            is_fragile: false,
            requires_special_handling: false,
            special_instructions: None,
            images: None,
        }
    }

    #[test]
    fn test_fee_tier_anchors() {
        // Documented anchor points of the schedule
        assert_eq!(delivery_fee(5.0), 2_000.0); // 1000 + 5*200
        assert_eq!(delivery_fee(20.0), 4_250.0); // 1000 + 1000 + 15*150
        assert_eq!(delivery_fee(25.0), 4_750.0); // 1000 + 3250 + 5*100
    }

    #[test]
    fn test_fee_zero_weight_is_base_only() {
        assert_eq!(delivery_fee(0.0), 1_000.0);
    }

    #[test]
    fn test_fee_continuous_at_tier_boundaries() {
        // Stepping just over a boundary must not jump the fee
        assert!((delivery_fee(5.01) - delivery_fee(5.0)).abs() <= 2.0);
        assert!((delivery_fee(20.01) - delivery_fee(20.0)).abs() <= 2.0);
    }

    #[test]
    fn test_fee_monotonically_non_decreasing() {
        let mut prev = delivery_fee(0.0);
        for tenths in 1..=300 {
            let fee = delivery_fee(tenths as f64 / 10.0);
            assert!(fee >= prev, "fee decreased at {} kg", tenths as f64 / 10.0);
            prev = fee;
        }
    }

    #[test]
    fn test_fee_rounds_to_whole_units() {
        // 3.3 kg -> 1000 + 660 = 1660 exactly; 3.333 kg -> 1666.6 -> 1667
        assert_eq!(delivery_fee(3.3), 1_660.0);
        assert_eq!(delivery_fee(3.333), 1_667.0);
    }

    #[test]
    fn test_totals_are_exact_sums() {
        let items = vec![item(3.0, 5_000.0, 2), item(1.5, 250.75, 4)];
        assert_eq!(total_weight_kg(&items), 12.0);
        assert_eq!(total_item_value(&items), 11_003.0); // 10000 + 1003.00
    }

    #[test]
    fn test_quote_marginal_band_scenario() {
        // 2 x 3 kg = 6 kg lands in the mid band:
        // base 1000 + full light band 1000 + 1 kg x 150 = 2150
        let items = vec![item(3.0, 5_000.0, 2)];
        let quote = quote(&items);
        assert_eq!(quote.item_value, 10_000.0);
        assert_eq!(quote.delivery_fee, 2_150.0);
        assert_eq!(quote.total, 12_150.0);
    }

    #[test]
    fn test_quote_is_idempotent() {
        let items = vec![item(2.25, 1_999.99, 3), item(11.0, 75.5, 1)];
        assert_eq!(quote(&items), quote(&items));
    }

    #[test]
    fn test_quote_empty_items() {
        let quote = quote(&[]);
        assert_eq!(quote.item_value, 0.0);
        assert_eq!(quote.delivery_fee, 1_000.0);
        assert_eq!(quote.total, 1_000.0);
    }

    #[test]
    fn test_insurance_covers_only_flagged_lines() {
        let mut fragile = item(1.0, 10_000.0, 2);
        fragile.is_fragile = true;
        let mut special = item(1.0, 5_000.0, 1);
        special.requires_special_handling = true;
        let plain = item(1.0, 100_000.0, 1);

        let surcharge = insurance_surcharge(&[fragile, special, plain]);
        // 2% of (20000 + 5000); the plain line is not covered
        assert_eq!(surcharge, 500.0);
    }

    #[test]
    fn test_insurance_zero_when_nothing_flagged() {
        assert_eq!(insurance_surcharge(&[item(1.0, 9_999.0, 3)]), 0.0);
    }

    #[test]
    fn test_money_eq_tolerance() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }

    #[test]
    fn test_decimal_accumulation_precision() {
        // Classic f64 trap: summing 0.1 must not drift
        let items: Vec<ItemDetails> = (0..10).map(|_| item(0.1, 0.1, 1)).collect();
        assert_eq!(total_weight_kg(&items), 1.0);
        assert_eq!(total_item_value(&items), 1.0);
    }
}
