// src/backend/storage/mod.rs
// Stable memory management using ic-stable-structures

pub mod config;
pub mod drafts;
pub mod memory;
pub mod metrics;
pub mod shipments;
pub mod storable;

// Re-export key storage structures and functions for easier access
pub use memory::Memory;
pub use metrics::{get_metrics, update_metrics};
pub use storable::{Cbor, StorableString};
