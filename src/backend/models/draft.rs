// src/backend/models/draft.rs
use crate::models::common::{Timestamp, TrackingNumber};
use crate::models::payloads::ShipmentPatch;
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// A shipment under construction. Stored apart from real shipments and
/// never carries status or history.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DraftShipment {
    pub tracking_number: TrackingNumber,
    pub fields: ShipmentPatch,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
