pub mod common;
pub mod draft;
pub mod history;
pub mod init;
pub mod payloads;
pub mod shipment;

// Re-export common types/enums for easier access
pub use common::*;
