//! Shared domain models for the logistics booking engine
//!
//! This crate holds the data shapes passed between the booking wizard and
//! the engine: the in-progress [`models::OrderDraft`], the finalized
//! [`models::Order`], and the [`update::SectionUpdate`] commands that carry
//! one wizard step's contribution to the draft.
//!
//! Pure data only - no storage, no network, no clocks beyond the timestamp
//! helpers in [`util`].

pub mod models;
pub mod update;
pub mod util;

// Re-export common types
pub use models::{
    DeliveryDetails, DeliveryMethod, Dimensions, DraftMeta, DraftMetaPatch, DraftPatch,
    ItemDetails, Location, Locations, Order, OrderDraft, OrderStatus, PricingSummary,
    ReceiverDetails, SenderDetails, VehicleType,
};
pub use update::{DeliveryUpdate, ItemsOp, SectionUpdate};
