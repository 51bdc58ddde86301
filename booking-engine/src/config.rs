//! Booking business-rule configuration
//!
//! # Environment variables
//!
//! Every value can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | MIN_PICKUP_LEAD_HOURS | 2 | Minimum lead time for a same-day pickup |
//! | MAX_PICKUP_DAYS | 14 | Scheduling horizon from now |
//! | BUSINESS_OPEN_HOUR | 8 | Earliest pickup hour (inclusive) |
//! | BUSINESS_CLOSE_HOUR | 18 | Latest pickup hour |
//! | MAX_DIMENSION_CM | 500 | Per-axis item dimension cap |
//! | MAX_ITEM_IMAGES | 4 | Image URIs allowed per item |

/// Business-rule constants consumed by the validators
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Minimum lead time for a same-day pickup, in hours
    pub min_pickup_lead_hours: i64,
    /// How far ahead a pickup may be scheduled, in days
    pub max_pickup_days: i64,
    /// Earliest pickup hour of day (inclusive)
    pub business_open_hour: u32,
    /// Latest pickup hour of day (a pickup exactly on the hour is allowed)
    pub business_close_hour: u32,
    /// Per-axis item dimension cap in centimetres
    pub max_dimension_cm: f64,
    /// Image URIs allowed per item
    pub max_item_images: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            min_pickup_lead_hours: 2,
            max_pickup_days: 14,
            business_open_hour: 8,
            business_close_hour: 18,
            max_dimension_cm: 500.0,
            max_item_images: 4,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_pickup_lead_hours: std::env::var("MIN_PICKUP_LEAD_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_pickup_lead_hours),
            max_pickup_days: std::env::var("MAX_PICKUP_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_pickup_days),
            business_open_hour: std::env::var("BUSINESS_OPEN_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.business_open_hour),
            business_close_hour: std::env::var("BUSINESS_CLOSE_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.business_close_hour),
            max_dimension_cm: std::env::var("MAX_DIMENSION_CM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_dimension_cm),
            max_item_images: std::env::var("MAX_ITEM_IMAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_item_images),
        }
    }
}
