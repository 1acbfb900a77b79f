// src/backend/lib.rs

pub mod api;
pub mod error;
pub mod http;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Types named in endpoint signatures, in scope for export_candid!.
use crate::api::{GetMetricsResponse, ListRequest, ListShipmentsResponse, SaveDraftRequest, UpdateShipmentRequest};
use crate::error::ShipmentError;
use crate::http::{HttpRequest, HttpResponse};
use crate::models::common::TrackingNumber;
use crate::models::draft::DraftShipment;
use crate::models::init::InitArgs;
use crate::models::payloads::ShipmentInitData;
use crate::models::shipment::Shipment;

fn apply_init_args(args: &InitArgs) {
    if let Err(e) = storage::config::init_config(args) {
        ic_cdk::eprintln!("ERROR: Failed to apply init args: {}", e);
    }
}

#[ic_cdk::init]
fn init(args: InitArgs) {
    apply_init_args(&args);
    ic_cdk::println!(
        "INFO: Tracking canister initialized with {} admin(s).",
        storage::config::get_admins().len()
    );
}

#[ic_cdk::post_upgrade]
fn post_upgrade(args: Option<InitArgs>) {
    if let Some(args) = args {
        apply_init_args(&args);
    }
    ic_cdk::println!(
        "INFO: Tracking canister upgraded, {} shipment(s) in stable memory.",
        storage::shipments::shipment_count()
    );
}

ic_cdk::export_candid!();
