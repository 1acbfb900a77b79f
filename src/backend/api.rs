// src/backend/api.rs
// Candid endpoints. Admin-console calls are guarded; reads of a single
// shipment and the HTTP gateway are public.

use crate::{
    error::ShipmentError,
    http::{self, HttpRequest, HttpResponse},
    metrics::{self, ShipmentMetrics},
    models::{
        common::{Priority, ServiceType, Timestamp, TrackingNumber},
        draft::DraftShipment,
        payloads::{ShipmentInitData, ShipmentPatch},
        shipment::Shipment,
    },
    services::{draft_service, shipment_service},
    storage,
    utils::{
        crypto,
        guards::{admin_guard, check_cycles},
    },
};
use candid::{CandidType, Deserialize};
use ic_cdk_macros::{query, update};
use serde::Serialize;
use validator::Validate;

// --- Request/Response Structs ---

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct UpdateShipmentRequest {
    pub tracking_number: TrackingNumber,
    pub fields: ShipmentPatch,
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct SaveDraftRequest {
    pub tracking_number: TrackingNumber,
    pub fields: ShipmentPatch,
}

#[derive(CandidType, Deserialize, Clone, Debug, Default, Validate)]
pub struct ListRequest {
    pub offset: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    #[validate(length(min = 1, max = 64, message = "Status must be between 1 and 64 characters"))]
    pub status: Option<String>,
}

/// Row of the admin shipment table.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug)]
pub struct ShipmentSummary {
    pub tracking_number: TrackingNumber,
    pub status: String,
    pub recipient_name: String,
    pub destination: String,
    pub service_type: ServiceType,
    pub priority: Priority,
    pub history_len: u32,
    pub updated_at: Timestamp,
}

impl From<Shipment> for ShipmentSummary {
    fn from(shipment: Shipment) -> Self {
        Self {
            destination: format!("{}, {}", shipment.recipient.city, shipment.recipient.state),
            history_len: shipment.history.len() as u32,
            tracking_number: shipment.tracking_number,
            status: shipment.status,
            recipient_name: shipment.recipient.name,
            service_type: shipment.service_type,
            priority: shipment.priority,
            updated_at: shipment.updated_at,
        }
    }
}

#[derive(CandidType, Deserialize, Clone, Debug, Default)]
pub struct ListShipmentsResponse {
    pub shipments: Vec<ShipmentSummary>,
    pub total: u64,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default)]
pub struct GetMetricsResponse {
    pub metrics: ShipmentMetrics,
    pub shipment_count: u64,
    pub cycle_balance: u128,
}

// --- Shipment Endpoints ---

#[update(guard = "admin_guard")]
fn create_shipment(data: ShipmentInitData) -> Result<Shipment, ShipmentError> {
    check_cycles()?;
    shipment_service::create_shipment(data)
}

#[query]
fn get_shipment(tracking_number: TrackingNumber) -> Result<Shipment, ShipmentError> {
    shipment_service::get_shipment(&tracking_number)
}

#[update(guard = "admin_guard")]
fn update_shipment(req: UpdateShipmentRequest) -> Result<Shipment, ShipmentError> {
    check_cycles()?;
    shipment_service::update_shipment(&req.tracking_number, req.fields)
}

#[update(guard = "admin_guard")]
fn delete_shipment(tracking_number: TrackingNumber) -> Result<Shipment, ShipmentError> {
    check_cycles()?;
    shipment_service::delete_shipment(&tracking_number)
}

#[query(guard = "admin_guard")]
fn list_shipments(req: ListRequest) -> Result<ListShipmentsResponse, ShipmentError> {
    req.validate()?;

    let offset = req.offset.unwrap_or(0) as usize;
    let limit = req
        .limit
        .map(|l| l as usize)
        .unwrap_or(shipment_service::DEFAULT_PAGE_SIZE);
    let (shipments, total) = shipment_service::list_shipments(offset, limit, req.status.as_deref());

    Ok(ListShipmentsResponse {
        shipments: shipments.into_iter().map(ShipmentSummary::from).collect(),
        total,
    })
}

#[update(guard = "admin_guard")]
async fn generate_tracking_number() -> Result<TrackingNumber, ShipmentError> {
    check_cycles()?;
    let prefix = storage::config::get_tracking_prefix();
    crypto::generate_tracking_number(&prefix).await
}

// --- Draft Endpoints ---

#[update(guard = "admin_guard")]
fn save_draft(req: SaveDraftRequest) -> Result<DraftShipment, ShipmentError> {
    check_cycles()?;
    draft_service::save_draft(&req.tracking_number, req.fields)
}

#[update(guard = "admin_guard")]
fn update_draft(req: SaveDraftRequest) -> Result<DraftShipment, ShipmentError> {
    check_cycles()?;
    draft_service::update_draft(&req.tracking_number, req.fields)
}

#[query(guard = "admin_guard")]
fn get_draft(tracking_number: TrackingNumber) -> Result<DraftShipment, ShipmentError> {
    draft_service::get_draft(&tracking_number)
}

#[query(guard = "admin_guard")]
fn list_drafts() -> Vec<DraftShipment> {
    draft_service::list_drafts()
}

#[update(guard = "admin_guard")]
fn delete_draft(tracking_number: TrackingNumber) -> Result<(), ShipmentError> {
    check_cycles()?;
    draft_service::delete_draft(&tracking_number)
}

#[update(guard = "admin_guard")]
fn promote_draft(tracking_number: TrackingNumber) -> Result<Shipment, ShipmentError> {
    check_cycles()?;
    draft_service::promote_draft(&tracking_number)
}

// --- Admin & Metrics ---

#[query(guard = "admin_guard")]
fn get_metrics() -> GetMetricsResponse {
    GetMetricsResponse {
        metrics: metrics::get_shipment_metrics(),
        shipment_count: storage::shipments::shipment_count(),
        cycle_balance: ic_cdk::api::canister_balance128(),
    }
}

// --- HTTP Gateway ---

#[query]
fn http_request(req: HttpRequest) -> HttpResponse {
    http::handle_http_request(&req)
}
