// src/backend/models/payloads.rs
// Inbound shipment payloads. Enum-like fields arrive as strings and are
// checked by the validators below, not by Candid decoding.

use crate::models::common::{PackageType, Priority, ServiceType};
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError};

pub const MAX_TRACKING_NUMBER_LEN: usize = 64;

// --- Custom validators ---

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn validate_positive_number(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(field_error("positive_number", "Must be a positive number")),
    }
}

pub fn validate_non_negative_number(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n >= 0.0 => Ok(()),
        _ => Err(field_error("non_negative_number", "Must be a non-negative number")),
    }
}

pub fn validate_package_type(value: &str) -> Result<(), ValidationError> {
    PackageType::from_str(value)
        .map(|_| ())
        .map_err(|_| field_error("package_type", "Invalid package type"))
}

pub fn validate_service_type(value: &str) -> Result<(), ValidationError> {
    ServiceType::from_str(value)
        .map(|_| ())
        .map_err(|_| field_error("service_type", "Invalid service type"))
}

pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    Priority::from_str(value)
        .map(|_| ())
        .map_err(|_| field_error("priority", "Invalid priority level"))
}

fn validate_coordinate(value: f64, bound: f64, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(field_error(code, message))
    }
}

/// Finite and within [-90, 90].
pub fn validate_latitude(value: impl std::borrow::Borrow<f64>) -> Result<(), ValidationError> {
    validate_coordinate(*value.borrow(), 90.0, "latitude", "Latitude must be between -90 and 90")
}

pub fn validate_longitude(value: impl std::borrow::Borrow<f64>) -> Result<(), ValidationError> {
    validate_coordinate(*value.borrow(), 180.0, "longitude", "Longitude must be between -180 and 180")
}

/// Tracking numbers are non-empty, at most 64 chars, ASCII alphanumerics and dashes.
pub fn validate_tracking_number(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error("tracking_number", "Tracking number is required"));
    }
    if value.len() > MAX_TRACKING_NUMBER_LEN
        || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(field_error(
            "tracking_number",
            "Tracking number may only contain letters, digits and dashes (max 64)",
        ));
    }
    Ok(())
}

// --- Creation payload ---

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, Validate)]
pub struct PartyData {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone must be at least 10 characters"))]
    pub phone: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,
    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: String,
    #[validate(length(min = 2, message = "State must be at least 2 characters"))]
    pub state: String,
    #[validate(length(min = 3, message = "ZIP code must be at least 3 characters"))]
    pub zip: String,
    #[validate(length(min = 2, message = "Country must be at least 2 characters"))]
    pub country: String,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, Validate)]
pub struct DimensionsData {
    #[validate(custom(function = "validate_positive_number", message = "Length must be a positive number"))]
    pub length: String,
    #[validate(custom(function = "validate_positive_number", message = "Width must be a positive number"))]
    pub width: String,
    #[validate(custom(function = "validate_positive_number", message = "Height must be a positive number"))]
    pub height: String,
}

/// Everything needed to open a shipment. Status and history are not part
/// of the payload; the store seeds them.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, Validate)]
pub struct ShipmentInitData {
    #[validate(custom(function = "validate_tracking_number"))]
    pub tracking_number: String,

    #[validate(nested)]
    pub sender: PartyData,
    #[validate(nested)]
    pub recipient: PartyData,

    #[validate(custom(function = "validate_package_type", message = "Invalid package type"))]
    pub package_type: String,
    #[validate(custom(function = "validate_positive_number", message = "Weight must be a positive number"))]
    pub weight: String,
    #[validate(nested)]
    pub dimensions: DimensionsData,
    #[validate(custom(function = "validate_positive_number", message = "Declared value must be a positive number"))]
    pub value: String,
    pub description: Option<String>,
    pub special_instructions: Option<String>,

    #[validate(custom(function = "validate_service_type", message = "Invalid service type"))]
    pub service_type: String,
    #[validate(custom(function = "validate_priority", message = "Invalid priority level"))]
    pub priority: String,
    pub insurance: Option<bool>,
    pub signature_required: Option<bool>,
    #[validate(length(min = 1, message = "Shipping date is required"))]
    pub shipping_date: String,
    #[validate(length(min = 1, message = "Estimated delivery date is required"))]
    pub estimated_delivery_date: String,
    #[validate(custom(function = "validate_non_negative_number", message = "Shipping cost must be a non-negative number"))]
    pub shipping_cost: String,

    #[validate(
        required(message = "Latitude is required"),
        custom(function = "validate_latitude", message = "Latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,
    #[validate(
        required(message = "Longitude is required"),
        custom(function = "validate_longitude", message = "Longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
    #[validate(custom(function = "validate_latitude", message = "Latitude must be between -90 and 90"))]
    pub recipient_latitude: Option<f64>,
    #[validate(custom(function = "validate_longitude", message = "Longitude must be between -180 and 180"))]
    pub recipient_longitude: Option<f64>,
}

impl ShipmentInitData {
    /// Fills a creation payload from a draft. Missing fields become empty
    /// values so that validation reports each of them.
    pub fn from_patch(tracking_number: &str, patch: &ShipmentPatch) -> Self {
        let dimensions = patch.dimensions.clone().unwrap_or_default();
        Self {
            tracking_number: tracking_number.to_string(),
            sender: patch.sender.clone().unwrap_or_default().into_party_data(),
            recipient: patch.recipient.clone().unwrap_or_default().into_party_data(),
            package_type: patch.package_type.clone().unwrap_or_default(),
            weight: patch.weight.clone().unwrap_or_default(),
            dimensions: DimensionsData {
                length: dimensions.length.unwrap_or_default(),
                width: dimensions.width.unwrap_or_default(),
                height: dimensions.height.unwrap_or_default(),
            },
            value: patch.value.clone().unwrap_or_default(),
            description: patch.description.clone(),
            special_instructions: patch.special_instructions.clone(),
            service_type: patch.service_type.clone().unwrap_or_default(),
            priority: patch.priority.clone().unwrap_or_default(),
            insurance: patch.insurance,
            signature_required: patch.signature_required,
            shipping_date: patch.shipping_date.clone().unwrap_or_default(),
            estimated_delivery_date: patch.estimated_delivery_date.clone().unwrap_or_default(),
            shipping_cost: patch.shipping_cost.clone().unwrap_or_default(),
            latitude: patch.latitude,
            longitude: patch.longitude,
            recipient_latitude: patch.recipient_latitude,
            recipient_longitude: patch.recipient_longitude,
        }
    }
}

// --- Partial payloads (updates and drafts) ---

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq, Validate)]
pub struct PartyPatch {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 10, message = "Phone must be at least 10 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: Option<String>,
    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: Option<String>,
    #[validate(length(min = 2, message = "State must be at least 2 characters"))]
    pub state: Option<String>,
    #[validate(length(min = 3, message = "ZIP code must be at least 3 characters"))]
    pub zip: Option<String>,
    #[validate(length(min = 2, message = "Country must be at least 2 characters"))]
    pub country: Option<String>,
}

impl PartyPatch {
    fn into_party_data(self) -> PartyData {
        PartyData {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            zip: self.zip.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
        }
    }

    fn merge(&mut self, other: PartyPatch) {
        merge_field(&mut self.name, other.name);
        merge_field(&mut self.email, other.email);
        merge_field(&mut self.phone, other.phone);
        merge_field(&mut self.address, other.address);
        merge_field(&mut self.city, other.city);
        merge_field(&mut self.state, other.state);
        merge_field(&mut self.zip, other.zip);
        merge_field(&mut self.country, other.country);
    }
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq, Validate)]
pub struct DimensionsPatch {
    #[validate(custom(function = "validate_positive_number", message = "Length must be a positive number"))]
    pub length: Option<String>,
    #[validate(custom(function = "validate_positive_number", message = "Width must be a positive number"))]
    pub width: Option<String>,
    #[validate(custom(function = "validate_positive_number", message = "Height must be a positive number"))]
    pub height: Option<String>,
}

/// Any subset of shipment fields. Used as the update payload and as the
/// body of a draft. The tracking number is not patchable.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq, Validate)]
pub struct ShipmentPatch {
    #[validate(length(min = 1, max = 64, message = "Status must be between 1 and 64 characters"))]
    pub status: Option<String>,

    #[validate(nested)]
    pub sender: Option<PartyPatch>,
    #[validate(nested)]
    pub recipient: Option<PartyPatch>,

    #[validate(custom(function = "validate_package_type", message = "Invalid package type"))]
    pub package_type: Option<String>,
    #[validate(custom(function = "validate_positive_number", message = "Weight must be a positive number"))]
    pub weight: Option<String>,
    #[validate(nested)]
    pub dimensions: Option<DimensionsPatch>,
    #[validate(custom(function = "validate_positive_number", message = "Declared value must be a positive number"))]
    pub value: Option<String>,
    pub description: Option<String>,
    pub special_instructions: Option<String>,

    #[validate(custom(function = "validate_service_type", message = "Invalid service type"))]
    pub service_type: Option<String>,
    #[validate(custom(function = "validate_priority", message = "Invalid priority level"))]
    pub priority: Option<String>,
    pub insurance: Option<bool>,
    pub signature_required: Option<bool>,
    #[validate(length(min = 1, message = "Shipping date is required"))]
    pub shipping_date: Option<String>,
    #[validate(length(min = 1, message = "Estimated delivery date is required"))]
    pub estimated_delivery_date: Option<String>,
    #[validate(custom(function = "validate_non_negative_number", message = "Shipping cost must be a non-negative number"))]
    pub shipping_cost: Option<String>,

    #[validate(custom(function = "validate_latitude", message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(custom(function = "validate_longitude", message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    #[validate(custom(function = "validate_latitude", message = "Latitude must be between -90 and 90"))]
    pub recipient_latitude: Option<f64>,
    #[validate(custom(function = "validate_longitude", message = "Longitude must be between -180 and 180"))]
    pub recipient_longitude: Option<f64>,
}

fn merge_field<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

impl ShipmentPatch {
    /// Overlays every field present in `other` onto `self`.
    pub fn merge(&mut self, other: ShipmentPatch) {
        merge_field(&mut self.status, other.status);
        match (self.sender.as_mut(), other.sender) {
            (Some(current), Some(incoming)) => current.merge(incoming),
            (None, incoming) => self.sender = incoming,
            _ => {}
        }
        match (self.recipient.as_mut(), other.recipient) {
            (Some(current), Some(incoming)) => current.merge(incoming),
            (None, incoming) => self.recipient = incoming,
            _ => {}
        }
        merge_field(&mut self.package_type, other.package_type);
        merge_field(&mut self.weight, other.weight);
        match (self.dimensions.as_mut(), other.dimensions) {
            (Some(current), Some(incoming)) => {
                merge_field(&mut current.length, incoming.length);
                merge_field(&mut current.width, incoming.width);
                merge_field(&mut current.height, incoming.height);
            }
            (None, incoming) => self.dimensions = incoming,
            _ => {}
        }
        merge_field(&mut self.value, other.value);
        merge_field(&mut self.description, other.description);
        merge_field(&mut self.special_instructions, other.special_instructions);
        merge_field(&mut self.service_type, other.service_type);
        merge_field(&mut self.priority, other.priority);
        merge_field(&mut self.insurance, other.insurance);
        merge_field(&mut self.signature_required, other.signature_required);
        merge_field(&mut self.shipping_date, other.shipping_date);
        merge_field(&mut self.estimated_delivery_date, other.estimated_delivery_date);
        merge_field(&mut self.shipping_cost, other.shipping_cost);
        merge_field(&mut self.latitude, other.latitude);
        merge_field(&mut self.longitude, other.longitude);
        merge_field(&mut self.recipient_latitude, other.recipient_latitude);
        merge_field(&mut self.recipient_longitude, other.recipient_longitude);
    }
}
