// src/backend/models/shipment.rs
use crate::error::{FieldError, ShipmentError};
use crate::models::common::{PackageType, Priority, ServiceType, Timestamp, TrackingNumber};
use crate::models::history::HistoryEntry;
use crate::models::payloads::{PartyData, PartyPatch, ShipmentInitData, ShipmentPatch};
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const INITIAL_STATUS: &str = "pending";

/// Sender or recipient of a parcel.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Party {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl From<PartyData> for Party {
    fn from(data: PartyData) -> Self {
        Self {
            name: data.name,
            email: data.email,
            phone: data.phone,
            address: data.address,
            city: data.city,
            state: data.state,
            zip: data.zip,
            country: data.country,
        }
    }
}

impl Party {
    fn apply(&mut self, patch: &PartyPatch) {
        if let Some(name) = &patch.name { self.name = name.clone(); }
        if let Some(email) = &patch.email { self.email = email.clone(); }
        if let Some(phone) = &patch.phone { self.phone = phone.clone(); }
        if let Some(address) = &patch.address { self.address = address.clone(); }
        if let Some(city) = &patch.city { self.city = city.clone(); }
        if let Some(state) = &patch.state { self.state = state.clone(); }
        if let Some(zip) = &patch.zip { self.zip = zip.clone(); }
        if let Some(country) = &patch.country { self.country = country.clone(); }
    }
}

/// Package dimensions, kept as the numeric strings the console submits.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub length: String,
    pub width: String,
    pub height: String,
}

/// A tracked shipment. One document per tracking number, history embedded.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Shipment {
    pub tracking_number: TrackingNumber,
    pub sender: Party,
    pub recipient: Party,

    pub package_type: PackageType,
    pub weight: String,
    pub dimensions: Dimensions,
    pub value: String,
    pub description: String,
    pub special_instructions: String,

    pub service_type: ServiceType,
    pub priority: Priority,
    pub insurance: bool,
    pub signature_required: bool,
    pub shipping_date: String,
    pub estimated_delivery_date: String,
    pub shipping_cost: String,

    pub latitude: f64,
    pub longitude: f64,
    pub recipient_latitude: Option<f64>,
    pub recipient_longitude: Option<f64>,

    /// Authoritative current status. Not a closed set.
    pub status: String,
    /// Append-only, insertion order.
    pub history: Vec<HistoryEntry>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn parse_field<T: FromStr>(field: &str, value: &str, message: &str) -> Result<T, ShipmentError> {
    T::from_str(value).map_err(|_| {
        ShipmentError::ValidationFailed(vec![FieldError::new(field, message)])
    })
}

fn required_coordinate(field: &str, value: Option<f64>) -> Result<f64, ShipmentError> {
    value.ok_or_else(|| {
        ShipmentError::ValidationFailed(vec![FieldError::new(field, "is required")])
    })
}

impl Shipment {
    /// Builds a shipment from an already validated payload, with `pending`
    /// status and the given seed entry as its only history.
    pub fn from_init_data(
        data: ShipmentInitData,
        seed: HistoryEntry,
        now: Timestamp,
    ) -> Result<Self, ShipmentError> {
        Ok(Self {
            package_type: parse_field("package_type", &data.package_type, "Invalid package type")?,
            service_type: parse_field("service_type", &data.service_type, "Invalid service type")?,
            priority: parse_field("priority", &data.priority, "Invalid priority level")?,
            latitude: required_coordinate("latitude", data.latitude)?,
            longitude: required_coordinate("longitude", data.longitude)?,
            tracking_number: data.tracking_number,
            sender: data.sender.into(),
            recipient: data.recipient.into(),
            weight: data.weight,
            dimensions: Dimensions {
                length: data.dimensions.length,
                width: data.dimensions.width,
                height: data.dimensions.height,
            },
            value: data.value,
            description: data.description.unwrap_or_default(),
            special_instructions: data.special_instructions.unwrap_or_default(),
            insurance: data.insurance.unwrap_or(false),
            signature_required: data.signature_required.unwrap_or(false),
            shipping_date: data.shipping_date,
            estimated_delivery_date: data.estimated_delivery_date,
            shipping_cost: data.shipping_cost,
            recipient_latitude: data.recipient_latitude,
            recipient_longitude: data.recipient_longitude,
            status: INITIAL_STATUS.to_string(),
            history: vec![seed],
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrites every field present in the patch. History is untouched.
    pub fn apply_patch(&mut self, patch: &ShipmentPatch) -> Result<(), ShipmentError> {
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(sender) = &patch.sender {
            self.sender.apply(sender);
        }
        if let Some(recipient) = &patch.recipient {
            self.recipient.apply(recipient);
        }
        if let Some(package_type) = &patch.package_type {
            self.package_type = parse_field("package_type", package_type, "Invalid package type")?;
        }
        if let Some(weight) = &patch.weight {
            self.weight = weight.clone();
        }
        if let Some(dimensions) = &patch.dimensions {
            if let Some(length) = &dimensions.length { self.dimensions.length = length.clone(); }
            if let Some(width) = &dimensions.width { self.dimensions.width = width.clone(); }
            if let Some(height) = &dimensions.height { self.dimensions.height = height.clone(); }
        }
        if let Some(value) = &patch.value {
            self.value = value.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(instructions) = &patch.special_instructions {
            self.special_instructions = instructions.clone();
        }
        if let Some(service_type) = &patch.service_type {
            self.service_type = parse_field("service_type", service_type, "Invalid service type")?;
        }
        if let Some(priority) = &patch.priority {
            self.priority = parse_field("priority", priority, "Invalid priority level")?;
        }
        if let Some(insurance) = patch.insurance {
            self.insurance = insurance;
        }
        if let Some(signature_required) = patch.signature_required {
            self.signature_required = signature_required;
        }
        if let Some(date) = &patch.shipping_date {
            self.shipping_date = date.clone();
        }
        if let Some(date) = &patch.estimated_delivery_date {
            self.estimated_delivery_date = date.clone();
        }
        if let Some(cost) = &patch.shipping_cost {
            self.shipping_cost = cost.clone();
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if patch.recipient_latitude.is_some() {
            self.recipient_latitude = patch.recipient_latitude;
        }
        if patch.recipient_longitude.is_some() {
            self.recipient_longitude = patch.recipient_longitude;
        }
        Ok(())
    }

    /// Latest entry by timestamp; on equal timestamps the later insertion wins.
    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.history
            .iter()
            .enumerate()
            .max_by_key(|(index, entry)| (entry.timestamp, *index))
            .map(|(_, entry)| entry)
    }

    /// Newest-first copy of the history for display. Stored order is unchanged.
    pub fn timeline(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<(usize, HistoryEntry)> =
            self.history.iter().cloned().enumerate().collect();
        entries.sort_by(|(ia, a), (ib, b)| b.timestamp.cmp(&a.timestamp).then(ib.cmp(ia)));
        entries.into_iter().map(|(_, entry)| entry).collect()
    }
}
