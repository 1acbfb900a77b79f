// src/backend/models/history.rs
use crate::models::common::Timestamp;
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// Icon tag rendered next to a timeline entry.
#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryIcon {
    #[serde(rename = "clock")]
    Clock,
    #[serde(rename = "truck")]
    Truck,
    #[serde(rename = "mappin")]
    MapPin,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "package")]
    Package,
    #[serde(rename = "alert")]
    Alert,
}

impl HistoryIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryIcon::Clock => "clock",
            HistoryIcon::Truck => "truck",
            HistoryIcon::MapPin => "mappin",
            HistoryIcon::Check => "check",
            HistoryIcon::X => "x",
            HistoryIcon::Package => "package",
            HistoryIcon::Alert => "alert",
        }
    }
}

/// One immutable entry in a shipment's timeline.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Status key the shipment carried once this entry was written.
    pub status: String,
    /// Free-text "City, State".
    pub location: String,
    pub description: String,
    /// Nanoseconds since epoch, assigned by the canister.
    pub timestamp: Timestamp,
    pub icon: HistoryIcon,
}

/// Status keys the timeline knows how to label. Anything else is still a
/// valid status, it just gets the fallback icon and description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnownStatus {
    Pending,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
    Processing,
    OnHold,
}

impl KnownStatus {
    /// Case-insensitive lookup of a status key.
    pub fn parse(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "pending" => Some(KnownStatus::Pending),
            "in-transit" => Some(KnownStatus::InTransit),
            "out-for-delivery" => Some(KnownStatus::OutForDelivery),
            "delivered" => Some(KnownStatus::Delivered),
            "cancelled" => Some(KnownStatus::Cancelled),
            "processing" => Some(KnownStatus::Processing),
            "on-hold" => Some(KnownStatus::OnHold),
            _ => None,
        }
    }

    pub fn icon(&self) -> HistoryIcon {
        match self {
            KnownStatus::Pending => HistoryIcon::Clock,
            KnownStatus::InTransit => HistoryIcon::Truck,
            KnownStatus::OutForDelivery => HistoryIcon::MapPin,
            KnownStatus::Delivered => HistoryIcon::Check,
            KnownStatus::Cancelled => HistoryIcon::X,
            KnownStatus::Processing => HistoryIcon::Package,
            KnownStatus::OnHold => HistoryIcon::Alert,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            KnownStatus::Pending => "Awaiting processing",
            KnownStatus::InTransit => "Package is on the way",
            KnownStatus::OutForDelivery => "Out for delivery to recipient",
            KnownStatus::Delivered => "Successfully delivered",
            KnownStatus::Cancelled => "Shipment cancelled",
            KnownStatus::Processing => "Being processed at facility",
            KnownStatus::OnHold => "Shipment is on hold",
        }
    }
}

pub const DEFAULT_ICON: HistoryIcon = HistoryIcon::Clock;
pub const DEFAULT_STATUS_DESCRIPTION: &str = "Status updated";

/// Icon for any status string, falling back to `clock`.
pub fn icon_for_status(status: &str) -> HistoryIcon {
    KnownStatus::parse(status)
        .map(|known| known.icon())
        .unwrap_or(DEFAULT_ICON)
}

/// Human-readable text for any status string, falling back to "Status updated".
pub fn description_for_status(status: &str) -> &'static str {
    KnownStatus::parse(status)
        .map(|known| known.description())
        .unwrap_or(DEFAULT_STATUS_DESCRIPTION)
}
