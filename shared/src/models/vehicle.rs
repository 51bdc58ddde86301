//! Vehicle Model

use serde::{Deserialize, Serialize};

/// Vehicle selected to carry a shipment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    /// Smallest capacity; the template default so a later explicit choice
    /// can only relax the weight constraint
    #[default]
    Bike,
    Car,
    Van,
    Truck,
}

impl VehicleType {
    /// Maximum total cargo weight in kilograms
    pub fn max_weight_kg(&self) -> f64 {
        match self {
            VehicleType::Bike => 100.0,
            VehicleType::Car => 500.0,
            VehicleType::Van => 1_500.0,
            VehicleType::Truck => 5_000.0,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Car => "car",
            VehicleType::Van => "van",
            VehicleType::Truck => "truck",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities_increase_by_vehicle_size() {
        assert!(VehicleType::Bike.max_weight_kg() < VehicleType::Car.max_weight_kg());
        assert!(VehicleType::Car.max_weight_kg() < VehicleType::Van.max_weight_kg());
        assert!(VehicleType::Van.max_weight_kg() < VehicleType::Truck.max_weight_kg());
    }

    #[test]
    fn test_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&VehicleType::Truck).unwrap();
        assert_eq!(json, "\"TRUCK\"");
        let back: VehicleType = serde_json::from_str("\"BIKE\"").unwrap();
        assert_eq!(back, VehicleType::Bike);
    }
}
