//! Section validators
//!
//! One pure validator per draft section. Each collects the full list of
//! human-readable errors for its section (empty list = valid) rather than
//! failing fast; the caller decides whether to block navigation. Nothing
//! here touches storage or the clock - `validate_schedule` takes `now` as
//! an argument.

use chrono::{DateTime, Duration, Timelike, Utc};
use rust_decimal::Decimal;

use shared::models::{DeliveryMethod, ItemDetails, ReceiverDetails, SenderDetails, VehicleType};

use crate::config::BookingConfig;
use crate::pricing::{to_decimal, to_f64};

/// Push a "{field} is required" error when the value is blank
fn require_filled(value: &str, field: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    }
}

/// Sender section: name, phone, address and state must all be filled
pub fn validate_sender(sender: &SenderDetails) -> Vec<String> {
    let mut errors = Vec::new();
    require_filled(&sender.name, "sender name", &mut errors);
    require_filled(&sender.phone, "sender phone", &mut errors);
    require_filled(&sender.address, "sender address", &mut errors);
    require_filled(&sender.state, "sender state", &mut errors);
    errors
}

/// Receiver section: name, phone and state always; address only for door
/// delivery, pickup center only for center pickup
pub fn validate_receiver(receiver: &ReceiverDetails) -> Vec<String> {
    let mut errors = Vec::new();
    require_filled(&receiver.name, "receiver name", &mut errors);
    require_filled(&receiver.phone, "receiver phone", &mut errors);
    require_filled(&receiver.state, "receiver state", &mut errors);

    match receiver.delivery_method {
        DeliveryMethod::Delivery => {
            if receiver.address.as_deref().map(str::trim).unwrap_or("").is_empty() {
                errors.push("receiver address is required for door delivery".to_string());
            }
        }
        DeliveryMethod::Pickup => {
            if receiver.pickup_center.as_deref().map(str::trim).unwrap_or("").is_empty() {
                errors.push("pickup center is required for center pickup".to_string());
            }
        }
    }
    errors
}

/// Cargo weight after accepting `candidate`, in kilograms.
///
/// `replacing` excludes the line being edited so a replace is charged for
/// its new weight only.
pub fn projected_weight_kg(
    existing: &[ItemDetails],
    replacing: Option<usize>,
    candidate: &ItemDetails,
) -> f64 {
    let mut total = Decimal::ZERO;
    for (index, item) in existing.iter().enumerate() {
        if Some(index) == replacing {
            continue;
        }
        total += to_decimal(item.weight) * Decimal::from(item.quantity);
    }
    total += to_decimal(candidate.weight) * Decimal::from(candidate.quantity);
    to_f64(total)
}

/// Structured capacity breach detail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityViolation {
    pub vehicle: VehicleType,
    pub total_kg: f64,
    pub max_kg: f64,
}

impl CapacityViolation {
    /// Human-readable form used inside validation error lists
    pub fn message(&self) -> String {
        format!(
            "total weight {:.1}kg exceeds the {} capacity of {:.0}kg",
            self.total_kg,
            self.vehicle.label(),
            self.max_kg
        )
    }
}

/// Capacity check for accepting `candidate` onto `vehicle`
pub fn capacity_violation(
    existing: &[ItemDetails],
    replacing: Option<usize>,
    candidate: &ItemDetails,
    vehicle: VehicleType,
) -> Option<CapacityViolation> {
    let total_kg = projected_weight_kg(existing, replacing, candidate);
    let max_kg = vehicle.max_weight_kg();
    (total_kg > max_kg).then_some(CapacityViolation {
        vehicle,
        total_kg,
        max_kg,
    })
}

/// Item section: field checks plus the projected-weight capacity rule.
///
/// The capacity check only runs once quantity and weight themselves are
/// valid, so a nonsense projection never produces a second error.
pub fn validate_item(
    item: &ItemDetails,
    existing: &[ItemDetails],
    replacing: Option<usize>,
    vehicle: VehicleType,
    config: &BookingConfig,
) -> Vec<String> {
    let mut errors = Vec::new();
    require_filled(&item.name, "item name", &mut errors);
    require_filled(&item.category, "item category", &mut errors);
    require_filled(&item.subcategory, "item subcategory", &mut errors);

    if item.quantity <= 0 {
        errors.push("quantity must be a positive whole number".to_string());
    }
    if !item.weight.is_finite() || item.weight <= 0.0 {
        errors.push("item weight must be greater than zero".to_string());
    }
    if !item.value.is_finite() || item.value <= 0.0 {
        errors.push("declared value must be greater than zero".to_string());
    }

    if let Some(dims) = &item.dimensions {
        for (axis, value) in [
            ("length", dims.length),
            ("width", dims.width),
            ("height", dims.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{axis} must be greater than zero"));
            } else if value > config.max_dimension_cm {
                errors.push(format!(
                    "{axis} exceeds the maximum of {:.0}cm",
                    config.max_dimension_cm
                ));
            }
        }
    }

    if let Some(images) = &item.images
        && images.len() > config.max_item_images
    {
        errors.push(format!("at most {} images per item", config.max_item_images));
    }

    if item.quantity > 0
        && item.weight.is_finite()
        && item.weight > 0.0
        && let Some(violation) = capacity_violation(existing, replacing, item, vehicle)
    {
        errors.push(violation.message());
    }

    errors
}

/// Schedule section: lead time, horizon and business hours.
///
/// Same-day pickups need the configured lead time; any other day must sit
/// in the future within the horizon. The time of day must fall inside
/// business hours (close on the hour is still accepted). Evaluated in UTC.
pub fn validate_schedule(
    pickup: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &BookingConfig,
) -> Vec<String> {
    let mut errors = Vec::new();

    if pickup.date_naive() == now.date_naive() {
        if pickup < now + Duration::hours(config.min_pickup_lead_hours) {
            errors.push(format!(
                "same-day pickup must be at least {} hours from now",
                config.min_pickup_lead_hours
            ));
        }
    } else if pickup < now {
        errors.push("pickup date must be in the future".to_string());
    } else if pickup > now + Duration::days(config.max_pickup_days) {
        errors.push(format!(
            "pickup must be within {} days from now",
            config.max_pickup_days
        ));
    }

    let hour = pickup.hour();
    let within_hours = hour >= config.business_open_hour
        && (hour < config.business_close_hour
            || (hour == config.business_close_hour
                && pickup.minute() == 0
                && pickup.second() == 0));
    if !within_hours {
        errors.push(format!(
            "pickup time must fall within business hours {:02}:00-{:02}:00",
            config.business_open_hour, config.business_close_hour
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> BookingConfig {
        BookingConfig::default()
    }

    fn sender() -> SenderDetails {
        SenderDetails {
            name: "Chidi".to_string(),
            address: "4 Awolowo Way".to_string(),
            phone: "08011112222".to_string(),
            state: "Lagos".to_string(),
        }
    }

    fn receiver() -> ReceiverDetails {
        ReceiverDetails {
            name: "Ada".to_string(),
            phone: "08012345678".to_string(),
            state: "Rivers".to_string(),
            delivery_method: DeliveryMethod::Delivery,
            address: Some("5 Aba Road".to_string()),
            pickup_center: None,
        }
    }

    fn item(weight: f64, quantity: i32) -> ItemDetails {
        ItemDetails {
            name: "Parcel".to_string(),
            category: "General".to_string(),
            subcategory: "Boxed".to_string(),
            quantity,
            weight,
            value: 1_000.0,
            dimensions: None,
            is_fragile: false,
            requires_special_handling: false,
            special_instructions: None,
            images: None,
        }
    }

    // A Tuesday at 10:00 UTC, used as "now" throughout
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_sender_passes() {
        assert!(validate_sender(&sender()).is_empty());
    }

    #[test]
    fn test_sender_collects_all_errors() {
        let bad = SenderDetails {
            name: String::new(),
            address: "  ".to_string(),
            phone: String::new(),
            state: "Lagos".to_string(),
        };
        let errors = validate_sender(&bad);
        assert_eq!(errors.len(), 3, "all failures reported together: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("sender name")));
        assert!(errors.iter().any(|e| e.contains("sender phone")));
        assert!(errors.iter().any(|e| e.contains("sender address")));
    }

    #[test]
    fn test_receiver_delivery_requires_address() {
        let mut r = receiver();
        r.address = None;
        let errors = validate_receiver(&r);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("receiver address"));
    }

    #[test]
    fn test_receiver_pickup_requires_center_not_address() {
        let mut r = receiver();
        r.delivery_method = DeliveryMethod::Pickup;
        r.address = None;
        r.pickup_center = None;
        let errors = validate_receiver(&r);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("pickup center"));

        r.pickup_center = Some("Ikeja Hub".to_string());
        assert!(validate_receiver(&r).is_empty(), "address is not required for pickup");
    }

    #[test]
    fn test_valid_item_passes() {
        let errors = validate_item(&item(3.0, 2), &[], None, VehicleType::Bike, &config());
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_item_field_errors_collected_together() {
        let mut bad = item(0.0, 0);
        bad.name = String::new();
        bad.value = -1.0;
        let errors = validate_item(&bad, &[], None, VehicleType::Bike, &config());
        assert!(errors.iter().any(|e| e.contains("item name")));
        assert!(errors.iter().any(|e| e.contains("quantity")));
        assert!(errors.iter().any(|e| e.contains("weight")));
        assert!(errors.iter().any(|e| e.contains("declared value")));
    }

    #[test]
    fn test_item_rejects_non_finite_numbers() {
        let mut bad = item(f64::NAN, 1);
        bad.value = f64::INFINITY;
        let errors = validate_item(&bad, &[], None, VehicleType::Truck, &config());
        assert!(errors.iter().any(|e| e.contains("weight")));
        assert!(errors.iter().any(|e| e.contains("declared value")));
    }

    #[test]
    fn test_item_dimension_rules() {
        let mut boxed = item(1.0, 1);
        boxed.dimensions = Some(shared::models::Dimensions {
            length: 501.0,
            width: 0.0,
            height: 40.0,
        });
        let errors = validate_item(&boxed, &[], None, VehicleType::Van, &config());
        assert!(errors.iter().any(|e| e.contains("length exceeds")));
        assert!(errors.iter().any(|e| e.contains("width must be greater than zero")));
        assert!(!errors.iter().any(|e| e.contains("height")));
    }

    #[test]
    fn test_item_image_cap() {
        let mut pictured = item(1.0, 1);
        pictured.images = Some(vec!["file:///a.jpg".to_string(); 5]);
        let errors = validate_item(&pictured, &[], None, VehicleType::Bike, &config());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at most 4 images"));
    }

    #[test]
    fn test_projected_weight_excludes_replaced_line() {
        let existing = vec![item(40.0, 2), item(15.0, 1)]; // 95 kg total
        let replacement = item(10.0, 1);

        // Editing line 0 drops its 80 kg before adding the new 10 kg
        assert_eq!(projected_weight_kg(&existing, Some(0), &replacement), 25.0);
        // A plain add keeps everything
        assert_eq!(projected_weight_kg(&existing, None, &replacement), 105.0);
    }

    #[test]
    fn test_capacity_violation_on_add() {
        let existing = vec![item(40.0, 2)]; // 80 kg on a 100 kg bike
        let candidate = item(21.0, 1);
        let violation =
            capacity_violation(&existing, None, &candidate, VehicleType::Bike).unwrap();
        assert_eq!(violation.total_kg, 101.0);
        assert_eq!(violation.max_kg, 100.0);

        // The same cargo fits a car
        assert!(capacity_violation(&existing, None, &candidate, VehicleType::Car).is_none());
    }

    #[test]
    fn test_capacity_message_in_item_errors() {
        let existing = vec![item(90.0, 1)];
        let errors =
            validate_item(&item(20.0, 1), &existing, None, VehicleType::Bike, &config());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("exceeds the bike capacity"));
    }

    #[test]
    fn test_capacity_not_checked_when_weight_invalid() {
        let errors = validate_item(&item(-5.0, 1), &[], None, VehicleType::Bike, &config());
        assert_eq!(errors.len(), 1, "no phantom capacity error on invalid weight: {errors:?}");
        assert!(errors[0].contains("weight"));
    }

    #[test]
    fn test_schedule_same_day_lead_time() {
        let now = now();
        let too_soon = now + Duration::hours(1);
        let errors = validate_schedule(too_soon, now, &config());
        assert!(errors.iter().any(|e| e.contains("at least 2 hours")));

        let fine = now + Duration::hours(3); // 13:00, same day
        assert!(validate_schedule(fine, now, &config()).is_empty());
    }

    #[test]
    fn test_schedule_horizon() {
        let now = now();
        let past = now - Duration::days(2);
        assert!(validate_schedule(past, now, &config())
            .iter()
            .any(|e| e.contains("in the future")));

        let too_far = now + Duration::days(15);
        assert!(validate_schedule(too_far, now, &config())
            .iter()
            .any(|e| e.contains("within 14 days")));

        let edge = now + Duration::days(14); // 10:00, inside hours
        assert!(validate_schedule(edge, now, &config()).is_empty());
    }

    #[test]
    fn test_schedule_business_hours() {
        let now = now();
        let before_open = Utc.with_ymd_and_hms(2025, 3, 6, 7, 59, 0).unwrap();
        assert!(validate_schedule(before_open, now, &config())
            .iter()
            .any(|e| e.contains("business hours 08:00-18:00")));

        let after_close = Utc.with_ymd_and_hms(2025, 3, 6, 18, 30, 0).unwrap();
        assert!(!validate_schedule(after_close, now, &config()).is_empty());

        let open_edge = Utc.with_ymd_and_hms(2025, 3, 6, 8, 0, 0).unwrap();
        assert!(validate_schedule(open_edge, now, &config()).is_empty());

        // Exactly on the close hour is still within hours
        let close_edge = Utc.with_ymd_and_hms(2025, 3, 6, 18, 0, 0).unwrap();
        assert!(validate_schedule(close_edge, now, &config()).is_empty());
    }

    #[test]
    fn test_schedule_collects_lead_and_hours_errors() {
        let now = now();
        // Same day at 19:00: clears the lead time but falls outside hours
        let tonight = Utc.with_ymd_and_hms(2025, 3, 4, 19, 0, 0).unwrap();
        let errors = validate_schedule(tonight, now, &config());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("business hours"));

        // 11:00 same day: inside hours but under the lead time
        let soon = Utc.with_ymd_and_hms(2025, 3, 4, 11, 0, 0).unwrap();
        let errors = validate_schedule(soon, now, &config());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least 2 hours"));
    }
}
