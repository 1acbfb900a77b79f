// src/backend/http.rs
// Read-only JSON routes served through the HTTP gateway for the public
// tracking page.

use crate::models::shipment::Shipment;
use crate::storage;
use candid::{CandidType, Deserialize};
use serde::Serialize;

#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    #[serde(with = "serde_bytes")]
    pub body: Vec<u8>,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    #[serde(with = "serde_bytes")]
    pub body: Vec<u8>,
}

enum Route<'a> {
    Shipment(&'a str),
    History(&'a str),
}

fn route(url: &str) -> Option<Route<'_>> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["shipments", tracking] if !tracking.is_empty() => Some(Route::Shipment(tracking)),
        ["shipments", tracking, "history"] if !tracking.is_empty() => Some(Route::History(tracking)),
        _ => None,
    }
}

fn json_response<T: Serialize>(status_code: u16, value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => HttpResponse {
            status_code,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        },
        Err(e) => {
            ic_cdk::eprintln!("ERROR: Failed to encode HTTP response: {}", e);
            error_response(500, "Internal server error")
        }
    }
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: serde_json::json!({ "error": message }).to_string().into_bytes(),
    }
}

fn history_body(shipment: Shipment) -> serde_json::Value {
    serde_json::json!({
        "tracking_number": shipment.tracking_number,
        "status": shipment.status,
        "current": shipment.current_entry(),
        "history": shipment.timeline(),
    })
}

/// Dispatches a gateway request. Only `GET` is served.
pub fn handle_http_request(req: &HttpRequest) -> HttpResponse {
    if !req.method.eq_ignore_ascii_case("GET") {
        return error_response(405, "Method not allowed");
    }

    let Some(route) = route(&req.url) else {
        return error_response(404, "Not found");
    };

    match route {
        Route::Shipment(tracking) => match storage::shipments::get_shipment(tracking) {
            Some(shipment) => json_response(200, &shipment),
            None => error_response(404, "Shipment not found"),
        },
        Route::History(tracking) => match storage::shipments::get_shipment(tracking) {
            Some(shipment) => json_response(200, &history_body(shipment)),
            None => error_response(404, "Shipment not found"),
        },
    }
}
