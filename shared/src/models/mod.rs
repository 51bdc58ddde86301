//! Domain models

pub mod draft;
pub mod item;
pub mod order;
pub mod vehicle;

pub use draft::{
    DeliveryDetails, DeliveryMethod, DraftMeta, DraftMetaPatch, DraftPatch, Location, Locations,
    OrderDraft, PricingSummary, ReceiverDetails, SenderDetails, DEFAULT_COUNTRY,
};
pub use item::{Dimensions, ItemDetails};
pub use order::{Order, OrderStatus};
pub use vehicle::VehicleType;
