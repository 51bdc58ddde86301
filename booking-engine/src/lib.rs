//! Logistics booking engine - order-draft assembly, pricing and finalization
//!
//! The mobile client collects a shipment order across disconnected wizard
//! steps (sender, receiver, items, vehicle/schedule). This crate owns the
//! subsystem that merges those partial contributions into one consistent
//! draft, keeps the derived pricing in lockstep with its inputs, and turns
//! the completed draft into an immutable submitted order.
//!
//! # Module structure
//!
//! ```text
//! booking-engine/src/
//! ├── config.rs       # Business-rule constants (env-overridable)
//! ├── logger.rs       # tracing setup
//! ├── storage.rs      # Key-value seam + redb / in-memory backends
//! ├── draft_store.rs  # The single draft slot per user
//! ├── validators.rs   # Per-section completeness/correctness checks
//! ├── pricing.rs      # Weight-tier fee schedule and order totals
//! ├── assembler.rs    # merge_section: validate -> merge -> reprice -> persist
//! ├── documents.rs    # Document-store seam + in-memory fake
//! ├── finalize.rs     # Draft -> immutable Order submission
//! └── history.rs      # Read-back of submitted orders
//! ```
//!
//! # Data flow
//!
//! 1. A wizard step builds a `SectionUpdate`
//! 2. `DraftAssembler::merge_section` validates it against the current draft
//! 3. Valid updates merge; pricing recomputes when items or vehicle changed
//! 4. The merged draft persists atomically through `DraftStore`
//! 5. `OrderFinalizer::submit` re-validates everything, reprices, creates the
//!    order document and clears the draft
//!
//! Draft operations assume a single in-flight call per user session; there
//! is no internal locking and concurrent merges resolve last-writer-wins at
//! whole-section granularity.

pub mod assembler;
pub mod config;
pub mod documents;
pub mod draft_store;
pub mod finalize;
pub mod history;
pub mod logger;
pub mod pricing;
pub mod storage;
pub mod validators;

// Re-export public surface
pub use assembler::{DraftAssembler, MergeError, MergeResult};
pub use config::BookingConfig;
pub use documents::{DocumentError, DocumentStore, MemoryDocumentStore, ORDERS_COLLECTION};
pub use draft_store::DraftStore;
pub use finalize::{OrderFinalizer, Session, StaticSession, SubmitError, SubmitResult};
pub use history::OrderHistory;
pub use logger::{init_logger, init_logger_with_file};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, RedbKeyValueStore, StorageError, StorageResult,
};
