//! Shipment Item Model

use serde::{Deserialize, Serialize};

/// Physical dimensions in centimetres.
///
/// Giving any dimension means giving all three - the struct makes a partial
/// triple unrepresentable; zero or negative values are rejected by the item
/// validator instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// One item line on a shipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetails {
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub quantity: i32,
    /// Unit weight in kilograms
    pub weight: f64,
    /// Declared unit value in currency units
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub is_fragile: bool,
    #[serde(default)]
    pub requires_special_handling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Uploaded image URIs, capped by configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}
