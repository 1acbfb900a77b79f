// src/backend/metrics.rs
use crate::error::ShipmentResult;
use crate::storage::{get_metrics, update_metrics};
use candid::{CandidType, Deserialize};
use serde::Serialize;

/// Counters for the admin dashboard.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShipmentMetrics {
    pub shipments_created: u64,
    pub shipments_updated: u64,
    pub shipments_deleted: u64,
    pub history_entries_appended: u64,
    pub drafts_saved: u64,
    pub drafts_promoted: u64,
    pub drafts_deleted: u64,
}

// --- Metrics Update Helpers ---

pub fn record_shipment_created() -> ShipmentResult<()> {
    update_metrics(|metrics| {
        metrics.shipments_created = metrics.shipments_created.saturating_add(1);
        // the seed entry
        metrics.history_entries_appended = metrics.history_entries_appended.saturating_add(1);
    })
}

pub fn record_shipment_updated(appended_entry: bool) -> ShipmentResult<()> {
    update_metrics(|metrics| {
        metrics.shipments_updated = metrics.shipments_updated.saturating_add(1);
        if appended_entry {
            metrics.history_entries_appended = metrics.history_entries_appended.saturating_add(1);
        }
    })
}

pub fn record_shipment_deleted() -> ShipmentResult<()> {
    update_metrics(|metrics| {
        metrics.shipments_deleted = metrics.shipments_deleted.saturating_add(1);
    })
}

pub fn record_draft_saved() -> ShipmentResult<()> {
    update_metrics(|metrics| {
        metrics.drafts_saved = metrics.drafts_saved.saturating_add(1);
    })
}

pub fn record_draft_promoted() -> ShipmentResult<()> {
    update_metrics(|metrics| {
        metrics.drafts_promoted = metrics.drafts_promoted.saturating_add(1);
    })
}

pub fn record_draft_deleted() -> ShipmentResult<()> {
    update_metrics(|metrics| {
        metrics.drafts_deleted = metrics.drafts_deleted.saturating_add(1);
    })
}

/// Counter writes never fail the operation they describe; failures are logged.
pub fn log_failure(result: ShipmentResult<()>) {
    if let Err(e) = result {
        ic_cdk::eprintln!("WARN: metrics not recorded: {}", e);
    }
}

pub fn get_shipment_metrics() -> ShipmentMetrics {
    get_metrics()
}
