// src/backend/models/common.rs
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TrackingNumber = String;    // Globally unique shipment identifier

pub type Timestamp = u64; // Nanoseconds since epoch (IC time)
pub type TimestampNs = u64;

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum PackageType {
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "envelope")]
    Envelope,
    #[serde(rename = "pallet")]
    Pallet,
    #[serde(rename = "crate")]
    Crate,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum ServiceType {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "express")]
    Express,
    #[serde(rename = "overnight")]
    Overnight,
    #[serde(rename = "economy")]
    Economy,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum Priority {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "urgent")]
    Urgent,
}

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl FromStr for PackageType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box" => Ok(PackageType::Box),
            "envelope" => Ok(PackageType::Envelope),
            "pallet" => Ok(PackageType::Pallet),
            "crate" => Ok(PackageType::Crate),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for ServiceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ServiceType::Standard),
            "express" => Ok(ServiceType::Express),
            "overnight" => Ok(ServiceType::Overnight),
            "economy" => Ok(ServiceType::Economy),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl Default for PackageType { fn default() -> Self { PackageType::Box } }
impl Default for ServiceType { fn default() -> Self { ServiceType::Standard } }
impl Default for Priority { fn default() -> Self { Priority::Normal } }
