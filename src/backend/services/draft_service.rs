// src/backend/services/draft_service.rs
// Work-in-progress shipments. Drafts carry no status or history and are
// only validated in full when promoted.

use crate::{
    error::{FieldError, ShipmentError, ShipmentResult},
    metrics,
    models::{
        draft::DraftShipment,
        payloads::{validate_tracking_number, ShipmentInitData, ShipmentPatch},
        shipment::Shipment,
    },
    services::shipment_service,
    storage,
    utils::time::get_current_time_ns,
};

fn check_tracking_number(tracking_number: &str) -> ShipmentResult<()> {
    validate_tracking_number(tracking_number).map_err(|e| {
        let message = e
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid tracking number".to_string());
        ShipmentError::ValidationFailed(vec![FieldError::new("tracking_number", message)])
    })?;
    if storage::shipments::contains_shipment(tracking_number) {
        return Err(ShipmentError::TrackingNumberTaken(tracking_number.to_string()));
    }
    Ok(())
}

/// Creates or replaces the draft for `tracking_number`. A replaced draft
/// keeps its original `created_at`.
pub fn save_draft(tracking_number: &str, fields: ShipmentPatch) -> ShipmentResult<DraftShipment> {
    check_tracking_number(tracking_number)?;

    let now = get_current_time_ns();
    let created_at = storage::drafts::get_draft(tracking_number)
        .map(|existing| existing.created_at)
        .unwrap_or(now);
    let draft = DraftShipment {
        tracking_number: tracking_number.to_string(),
        fields,
        created_at,
        updated_at: now,
    };

    storage::drafts::insert_draft(&draft);
    metrics::log_failure(metrics::record_draft_saved());
    ic_cdk::println!("INFO: Draft {} saved", tracking_number);
    Ok(draft)
}

/// Overlays the present fields of `fields` onto an existing draft.
pub fn update_draft(tracking_number: &str, fields: ShipmentPatch) -> ShipmentResult<DraftShipment> {
    let mut draft = get_draft(tracking_number)?;
    draft.fields.merge(fields);
    draft.updated_at = get_current_time_ns();

    storage::drafts::insert_draft(&draft);
    metrics::log_failure(metrics::record_draft_saved());
    ic_cdk::println!("INFO: Draft {} updated", tracking_number);
    Ok(draft)
}

pub fn get_draft(tracking_number: &str) -> ShipmentResult<DraftShipment> {
    storage::drafts::get_draft(tracking_number)
        .ok_or_else(|| ShipmentError::DraftNotFound(tracking_number.to_string()))
}

pub fn list_drafts() -> Vec<DraftShipment> {
    storage::drafts::list_drafts()
}

pub fn delete_draft(tracking_number: &str) -> ShipmentResult<()> {
    storage::drafts::remove_draft(tracking_number)
        .ok_or_else(|| ShipmentError::DraftNotFound(tracking_number.to_string()))?;
    metrics::log_failure(metrics::record_draft_deleted());
    ic_cdk::println!("INFO: Draft {} deleted", tracking_number);
    Ok(())
}

/// Turns a draft into a real shipment. The draft is removed only after the
/// shipment is stored; any failure leaves it in place.
pub fn promote_draft(tracking_number: &str) -> ShipmentResult<Shipment> {
    let draft = get_draft(tracking_number)?;
    let data = ShipmentInitData::from_patch(&draft.tracking_number, &draft.fields);

    let shipment = shipment_service::create_shipment(data).map_err(|e| {
        ic_cdk::eprintln!("WARN: Draft {} not promoted: {}", tracking_number, e);
        e
    })?;

    storage::drafts::remove_draft(tracking_number);
    metrics::log_failure(metrics::record_draft_promoted());
    ic_cdk::println!("INFO: Draft {} promoted to shipment", tracking_number);
    Ok(shipment)
}
