// src/backend/services/history.rs
// Decides whether an update earns a timeline entry, and builds it.

use crate::models::common::Timestamp;
use crate::models::history::{description_for_status, icon_for_status, HistoryEntry, HistoryIcon};
use crate::models::payloads::ShipmentPatch;
use crate::models::shipment::{Shipment, INITIAL_STATUS};

pub const SEED_DESCRIPTION: &str = "Shipment created at origin facility";

/// Which of the three triggers an update fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryTriggers {
    pub status_changed: bool,
    pub location_changed: bool,
    pub address_changed: bool,
}

impl HistoryTriggers {
    pub fn any(&self) -> bool {
        self.status_changed || self.location_changed || self.address_changed
    }
}

fn differs<T: PartialEq>(incoming: Option<&T>, current: &T) -> bool {
    incoming.map_or(false, |value| value != current)
}

/// Compares only the fields present in `update`; absence is never a change.
pub fn detect_triggers(current: &Shipment, update: &ShipmentPatch) -> HistoryTriggers {
    let status_changed = differs(update.status.as_ref(), &current.status);
    let location_changed = differs(update.latitude.as_ref(), &current.latitude)
        || differs(update.longitude.as_ref(), &current.longitude);

    let address_changed = update.recipient.as_ref().map_or(false, |recipient| {
        differs(recipient.city.as_ref(), &current.recipient.city)
            || differs(recipient.state.as_ref(), &current.recipient.state)
            || differs(recipient.address.as_ref(), &current.recipient.address)
    });

    HistoryTriggers { status_changed, location_changed, address_changed }
}

/// "City, State" using the update's recipient city/state where given,
/// otherwise the shipment's current ones.
pub fn entry_location(current: &Shipment, update: &ShipmentPatch) -> String {
    let recipient = update.recipient.as_ref();
    let city = recipient
        .and_then(|r| r.city.as_deref())
        .unwrap_or(current.recipient.city.as_str());
    let state = recipient
        .and_then(|r| r.state.as_deref())
        .unwrap_or(current.recipient.state.as_str());
    format!("{}, {}", city, state)
}

pub fn compose_description(triggers: &HistoryTriggers, status: &str, location: &str) -> String {
    let moved = triggers.location_changed || triggers.address_changed;
    match (triggers.status_changed, moved) {
        (true, true) => format!(
            "{} - Location updated to {}",
            description_for_status(status),
            location
        ),
        (true, false) => description_for_status(status).to_string(),
        _ => format!("Location updated to {}", location),
    }
}

/// The entry `update` should append to `current`, or `None` when it is a
/// plain field mutation.
pub fn next_history_entry(
    current: &Shipment,
    update: &ShipmentPatch,
    now: Timestamp,
) -> Option<HistoryEntry> {
    let triggers = detect_triggers(current, update);
    if !triggers.any() {
        return None;
    }

    let status = update.status.clone().unwrap_or_else(|| current.status.clone());
    let location = entry_location(current, update);
    let description = compose_description(&triggers, &status, &location);

    Some(HistoryEntry {
        icon: icon_for_status(&status),
        status,
        location,
        description,
        timestamp: now,
    })
}

/// The single entry every new shipment starts with.
pub fn seed_entry(sender_city: &str, sender_state: &str, now: Timestamp) -> HistoryEntry {
    HistoryEntry {
        status: INITIAL_STATUS.to_string(),
        location: format!("{}, {}", sender_city, sender_state),
        description: SEED_DESCRIPTION.to_string(),
        timestamp: now,
        icon: HistoryIcon::Package,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::{PackageType, Priority, ServiceType};
    use crate::models::payloads::PartyPatch;
    use crate::models::shipment::{Dimensions, Party};
    use proptest::prelude::*;

    fn current() -> Shipment {
        Shipment {
            tracking_number: "RW0001".to_string(),
            sender: Party {
                city: "New York".to_string(),
                state: "NY".to_string(),
                ..Default::default()
            },
            recipient: Party {
                address: "1 Main Street".to_string(),
                city: "Denver".to_string(),
                state: "CO".to_string(),
                ..Default::default()
            },
            package_type: PackageType::Box,
            weight: "2".to_string(),
            dimensions: Dimensions::default(),
            value: "10".to_string(),
            description: String::new(),
            special_instructions: String::new(),
            service_type: ServiceType::Express,
            priority: Priority::High,
            insurance: false,
            signature_required: false,
            shipping_date: "2024-01-01".to_string(),
            estimated_delivery_date: "2024-01-05".to_string(),
            shipping_cost: "12.50".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
            recipient_latitude: None,
            recipient_longitude: None,
            status: "pending".to_string(),
            history: vec![seed_entry("New York", "NY", 1)],
            created_at: 1,
            updated_at: 1,
        }
    }

    fn recipient(city: Option<&str>, state: Option<&str>, address: Option<&str>) -> Option<PartyPatch> {
        Some(PartyPatch {
            city: city.map(str::to_string),
            state: state.map(str::to_string),
            address: address.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn status_change_alone_uses_status_description() {
        let update = ShipmentPatch { status: Some("delivered".to_string()), ..Default::default() };
        let entry = next_history_entry(&current(), &update, 99).unwrap();
        assert_eq!(entry.status, "delivered");
        assert_eq!(entry.description, "Successfully delivered");
        assert_eq!(entry.icon, HistoryIcon::Check);
        assert_eq!(entry.location, "Denver, CO");
        assert_eq!(entry.timestamp, 99);
    }

    #[test]
    fn status_and_address_change_compose() {
        let update = ShipmentPatch {
            status: Some("in-transit".to_string()),
            recipient: recipient(Some("Boston"), None, None),
            ..Default::default()
        };
        let entry = next_history_entry(&current(), &update, 5).unwrap();
        assert_eq!(entry.description, "Package is on the way - Location updated to Boston, CO");
        assert_eq!(entry.location, "Boston, CO");
        assert_eq!(entry.icon, HistoryIcon::Truck);
    }

    #[test]
    fn address_only_keeps_current_status() {
        let update = ShipmentPatch {
            recipient: recipient(None, None, Some("22 Harbor Road")),
            ..Default::default()
        };
        let entry = next_history_entry(&current(), &update, 5).unwrap();
        assert_eq!(entry.status, "pending");
        assert_eq!(entry.icon, HistoryIcon::Clock);
        assert!(entry.description.starts_with("Location updated to"));
        assert_eq!(entry.description, "Location updated to Denver, CO");
    }

    #[test]
    fn state_only_change_is_an_address_change() {
        let update = ShipmentPatch {
            recipient: recipient(None, Some("WY"), None),
            ..Default::default()
        };
        let triggers = detect_triggers(&current(), &update);
        assert!(triggers.address_changed);
        assert!(!triggers.location_changed);
        let entry = next_history_entry(&current(), &update, 5).unwrap();
        assert_eq!(entry.location, "Denver, WY");
        assert_eq!(entry.description, "Location updated to Denver, WY");
    }

    #[test]
    fn status_and_coordinate_change_compose() {
        let update = ShipmentPatch {
            status: Some("out-for-delivery".to_string()),
            latitude: Some(39.7392),
            longitude: Some(-104.9903),
            ..Default::default()
        };
        let triggers = detect_triggers(&current(), &update);
        assert!(triggers.status_changed && triggers.location_changed);
        assert!(!triggers.address_changed);

        let entry = next_history_entry(&current(), &update, 5).unwrap();
        assert_eq!(
            entry.description,
            "Out for delivery to recipient - Location updated to Denver, CO"
        );
        assert_eq!(entry.status, "out-for-delivery");
        assert_eq!(entry.location, "Denver, CO");
    }

    #[test]
    fn coordinate_change_triggers_entry() {
        let update = ShipmentPatch { longitude: Some(-80.0), ..Default::default() };
        let triggers = detect_triggers(&current(), &update);
        assert!(triggers.location_changed);
        assert!(!triggers.status_changed);
        assert!(next_history_entry(&current(), &update, 5).is_some());
    }

    #[test]
    fn unchanged_values_are_not_triggers() {
        let shipment = current();
        let update = ShipmentPatch {
            status: Some("pending".to_string()),
            latitude: Some(shipment.latitude),
            recipient: recipient(Some("Denver"), Some("CO"), Some("1 Main Street")),
            ..Default::default()
        };
        assert_eq!(detect_triggers(&shipment, &update), HistoryTriggers::default());
        assert!(next_history_entry(&shipment, &update, 5).is_none());
    }

    #[test]
    fn status_comparison_is_exact() {
        // Only the icon/description lookup is case-insensitive.
        let update = ShipmentPatch { status: Some("PENDING".to_string()), ..Default::default() };
        let entry = next_history_entry(&current(), &update, 5).unwrap();
        assert_eq!(entry.description, "Awaiting processing");
        assert_eq!(entry.icon, HistoryIcon::Clock);
    }

    #[test]
    fn unknown_status_uses_fallbacks() {
        let update = ShipmentPatch {
            status: Some("unknown-status-xyz".to_string()),
            ..Default::default()
        };
        let entry = next_history_entry(&current(), &update, 5).unwrap();
        assert_eq!(entry.icon, HistoryIcon::Clock);
        assert_eq!(entry.description, "Status updated");
    }

    #[test]
    fn seed_entry_is_fixed() {
        let entry = seed_entry("New York", "NY", 7);
        assert_eq!(entry.status, "pending");
        assert_eq!(entry.location, "New York, NY");
        assert_eq!(entry.description, "Shipment created at origin facility");
        assert_eq!(entry.icon, HistoryIcon::Package);
        assert_eq!(entry.timestamp, 7);
    }

    proptest! {
        #[test]
        fn fields_outside_the_triggers_never_append(
            weight in "[1-9][0-9]{0,3}",
            priority in prop::sample::select(vec!["low", "normal", "high", "urgent"]),
            insurance in any::<bool>(),
            notes in ".{0,40}",
        ) {
            let update = ShipmentPatch {
                weight: Some(weight),
                priority: Some(priority.to_string()),
                insurance: Some(insurance),
                special_instructions: Some(notes),
                sender: Some(PartyPatch { city: Some("Albany".to_string()), ..Default::default() }),
                ..Default::default()
            };
            prop_assert!(next_history_entry(&current(), &update, 5).is_none());
        }

        #[test]
        fn a_new_status_always_appends_with_that_status(status in "[a-z-]{1,20}") {
            prop_assume!(status != "pending");
            let update = ShipmentPatch { status: Some(status.clone()), ..Default::default() };
            let entry = next_history_entry(&current(), &update, 5);
            prop_assert!(entry.is_some());
            prop_assert_eq!(entry.unwrap().status, status);
        }
    }
}
