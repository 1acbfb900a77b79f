// src/backend/services/mod.rs
pub mod draft_service;
pub mod history;
pub mod shipment_service;
