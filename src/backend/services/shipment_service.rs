// src/backend/services/shipment_service.rs
// Shipment lifecycle: create, read, update (with history append), delete, list.

use crate::{
    error::{ShipmentError, ShipmentResult},
    metrics,
    models::{
        payloads::{ShipmentInitData, ShipmentPatch},
        shipment::Shipment,
    },
    services::history::{next_history_entry, seed_entry},
    storage,
    utils::time::get_current_time_ns,
};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Creates a shipment with status `pending` and its seed history entry.
///
/// # Errors
/// * `ValidationFailed` listing every bad field.
/// * `TrackingNumberTaken` if the number already belongs to a shipment.
pub fn create_shipment(data: ShipmentInitData) -> ShipmentResult<Shipment> {
    data.validate()?;

    let now = get_current_time_ns();
    let seed = seed_entry(&data.sender.city, &data.sender.state, now);
    let shipment = Shipment::from_init_data(data, seed, now)?;

    storage::shipments::insert_new_shipment(&shipment)?;
    metrics::log_failure(metrics::record_shipment_created());

    ic_cdk::println!("INFO: Shipment {} created", shipment.tracking_number);
    Ok(shipment)
}

/// Retrieves a shipment by tracking number.
pub fn get_shipment(tracking_number: &str) -> ShipmentResult<Shipment> {
    storage::shipments::get_shipment(tracking_number)
        .ok_or_else(|| ShipmentError::ShipmentNotFound(tracking_number.to_string()))
}

/// Applies a partial update and appends a history entry when the status,
/// coordinates or recipient address change. The decision is made against
/// the stored document inside the same storage borrow that writes it back.
///
/// # Errors
/// * `ValidationFailed` for a malformed patch (nothing is written).
/// * `ShipmentNotFound` if the tracking number is unknown.
pub fn update_shipment(tracking_number: &str, patch: ShipmentPatch) -> ShipmentResult<Shipment> {
    patch.validate()?;

    let now = get_current_time_ns();
    let (updated, appended) = storage::shipments::update_shipment_with(tracking_number, |shipment| {
        let entry = next_history_entry(shipment, &patch, now);
        shipment.apply_patch(&patch)?;
        let appended = entry.is_some();
        if let Some(entry) = entry {
            shipment.history.push(entry);
        }
        shipment.updated_at = now;
        Ok((shipment.clone(), appended))
    })?;

    metrics::log_failure(metrics::record_shipment_updated(appended));
    if let (true, Some(entry)) = (appended, updated.history.last()) {
        ic_cdk::println!(
            "INFO: Shipment {} updated, status '{}' [{}], history now {} entries",
            tracking_number,
            updated.status,
            entry.icon.as_str(),
            updated.history.len()
        );
    } else {
        ic_cdk::println!("INFO: Shipment {} updated (no history change)", tracking_number);
    }
    Ok(updated)
}

/// Hard-deletes a shipment and returns the removed document.
pub fn delete_shipment(tracking_number: &str) -> ShipmentResult<Shipment> {
    let removed = storage::shipments::remove_shipment(tracking_number)
        .ok_or_else(|| ShipmentError::ShipmentNotFound(tracking_number.to_string()))?;
    metrics::log_failure(metrics::record_shipment_deleted());
    ic_cdk::println!("INFO: Shipment {} deleted", tracking_number);
    Ok(removed)
}

/// One page of shipments in storage key order, optionally restricted
/// to a status (case-insensitive). Returns the page and the matching total.
pub fn list_shipments(
    offset: usize,
    limit: usize,
    status_filter: Option<&str>,
) -> (Vec<Shipment>, u64) {
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let wanted = status_filter.map(str::to_lowercase);
    storage::shipments::list_shipments(offset, limit, |shipment| match &wanted {
        Some(status) => shipment.status.to_lowercase() == *status,
        None => true,
    })
}

#[cfg(test)]
pub(crate) fn sample_init_data(tracking_number: &str) -> ShipmentInitData {
    use crate::models::payloads::{DimensionsData, PartyData};

    ShipmentInitData {
        tracking_number: tracking_number.to_string(),
        sender: PartyData {
            name: "Ada Sender".to_string(),
            email: "ada@example.com".to_string(),
            phone: "2125550100".to_string(),
            address: "350 Fifth Avenue".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip: "10118".to_string(),
            country: "USA".to_string(),
        },
        recipient: PartyData {
            name: "Ben Recipient".to_string(),
            email: "ben@example.com".to_string(),
            phone: "3035550199".to_string(),
            address: "1701 Wynkoop Street".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip: "80202".to_string(),
            country: "USA".to_string(),
        },
        package_type: "box".to_string(),
        weight: "4.2".to_string(),
        dimensions: DimensionsData {
            length: "30".to_string(),
            width: "20".to_string(),
            height: "15".to_string(),
        },
        value: "150".to_string(),
        description: Some("Books".to_string()),
        special_instructions: None,
        service_type: "express".to_string(),
        priority: "normal".to_string(),
        insurance: Some(true),
        signature_required: None,
        shipping_date: "2024-03-01".to_string(),
        estimated_delivery_date: "2024-03-04".to_string(),
        shipping_cost: "24.99".to_string(),
        latitude: Some(40.7128),
        longitude: Some(-74.006),
        recipient_latitude: Some(39.7392),
        recipient_longitude: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::history::HistoryIcon;
    use crate::models::payloads::PartyPatch;
    use proptest::prelude::*;

    fn status_patch(status: &str) -> ShipmentPatch {
        ShipmentPatch { status: Some(status.to_string()), ..Default::default() }
    }

    fn field_names(err: ShipmentError) -> Vec<String> {
        match err {
            ShipmentError::ValidationFailed(fields) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn create_seeds_pending_status_and_one_entry() {
        let shipment = create_shipment(sample_init_data("RW-CREATE")).unwrap();

        assert_eq!(shipment.status, "pending");
        assert_eq!(shipment.history.len(), 1);
        let seed = &shipment.history[0];
        assert_eq!(seed.status, "pending");
        assert_eq!(seed.icon, HistoryIcon::Package);
        assert_eq!(seed.location, "New York, NY");
        assert_eq!(seed.description, "Shipment created at origin facility");
        assert_eq!(seed.timestamp, shipment.created_at);
        assert!(!shipment.signature_required);
        assert_eq!(shipment.special_instructions, "");
        assert_eq!(get_shipment("RW-CREATE").unwrap(), shipment);
    }

    #[test]
    fn create_reports_every_invalid_field() {
        let mut data = sample_init_data("RW-BAD");
        data.sender.email = "not-an-email".to_string();
        data.recipient.city = "X".to_string();
        data.package_type = "barrel".to_string();
        data.dimensions.length = "-1".to_string();
        data.latitude = None;
        data.longitude = Some(200.0);

        let fields = field_names(create_shipment(data).unwrap_err());
        assert_eq!(
            fields,
            vec![
                "dimensions.length",
                "latitude",
                "longitude",
                "package_type",
                "recipient.city",
                "sender.email",
            ]
        );
        assert!(get_shipment("RW-BAD").is_err());
    }

    #[test]
    fn duplicate_tracking_number_is_distinct_error() {
        create_shipment(sample_init_data("RW-DUP")).unwrap();
        let err = create_shipment(sample_init_data("RW-DUP")).unwrap_err();
        assert_eq!(err, ShipmentError::TrackingNumberTaken("RW-DUP".to_string()));
    }

    #[test]
    fn unknown_tracking_number_is_not_found() {
        assert_eq!(
            get_shipment("NON-EXISTENT").unwrap_err(),
            ShipmentError::ShipmentNotFound("NON-EXISTENT".to_string())
        );
        assert!(matches!(
            update_shipment("NON-EXISTENT", status_patch("delivered")),
            Err(ShipmentError::ShipmentNotFound(_))
        ));
        assert!(matches!(delete_shipment("NON-EXISTENT"), Err(ShipmentError::ShipmentNotFound(_))));
        assert_eq!(storage::shipments::shipment_count(), 0);
    }

    #[test]
    fn delivered_update_appends_one_entry() {
        create_shipment(sample_init_data("RW-B")).unwrap();
        let updated = update_shipment("RW-B", status_patch("delivered")).unwrap();

        assert_eq!(updated.status, "delivered");
        assert_eq!(updated.history.len(), 2);
        let entry = updated.history.last().unwrap();
        assert_eq!(entry.status, "delivered");
        assert_eq!(entry.description, "Successfully delivered");
        assert_eq!(entry.icon, HistoryIcon::Check);
        assert_eq!(get_shipment("RW-B").unwrap(), updated);
    }

    #[test]
    fn same_status_is_a_plain_update() {
        create_shipment(sample_init_data("RW-SAME")).unwrap();
        let mut patch = status_patch("pending");
        patch.weight = Some("9".to_string());
        let updated = update_shipment("RW-SAME", patch).unwrap();

        assert_eq!(updated.history.len(), 1);
        assert_eq!(updated.weight, "9");
    }

    #[test]
    fn status_with_new_city_composes_description() {
        create_shipment(sample_init_data("RW-P5")).unwrap();
        let patch = ShipmentPatch {
            status: Some("in-transit".to_string()),
            recipient: Some(PartyPatch { city: Some("Boston".to_string()), ..Default::default() }),
            ..Default::default()
        };
        let updated = update_shipment("RW-P5", patch).unwrap();

        let entry = updated.history.last().unwrap();
        assert_eq!(entry.description, "Package is on the way - Location updated to Boston, CO");
        assert_eq!(updated.recipient.city, "Boston");
        assert_eq!(updated.recipient.state, "CO");
    }

    #[test]
    fn address_only_update_records_location_change() {
        create_shipment(sample_init_data("RW-C")).unwrap();
        let patch = ShipmentPatch {
            recipient: Some(PartyPatch {
                address: Some("900 Market Street".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let updated = update_shipment("RW-C", patch).unwrap();

        assert_eq!(updated.status, "pending");
        assert_eq!(updated.history.len(), 2);
        assert!(updated.history[1].description.starts_with("Location updated to"));
    }

    #[test]
    fn unknown_status_gets_fallback_icon() {
        create_shipment(sample_init_data("RW-P6")).unwrap();
        let updated = update_shipment("RW-P6", status_patch("unknown-status-xyz")).unwrap();
        let entry = updated.history.last().unwrap();
        assert_eq!(entry.icon, HistoryIcon::Clock);
        assert_eq!(entry.description, "Status updated");
    }

    #[test]
    fn invalid_patch_leaves_document_untouched() {
        let created = create_shipment(sample_init_data("RW-INV")).unwrap();
        let patch = ShipmentPatch {
            status: Some("delivered".to_string()),
            latitude: Some(123.0),
            service_type: Some("teleport".to_string()),
            ..Default::default()
        };
        let fields = field_names(update_shipment("RW-INV", patch).unwrap_err());
        assert_eq!(fields, vec!["latitude", "service_type"]);
        assert_eq!(get_shipment("RW-INV").unwrap(), created);
    }

    #[test]
    fn non_finite_coordinates_are_rejected_on_create() {
        let mut data = sample_init_data("RW-NAN-C");
        data.latitude = Some(f64::NAN);
        data.recipient_longitude = Some(f64::INFINITY);

        let fields = field_names(create_shipment(data).unwrap_err());
        assert_eq!(fields, vec!["latitude", "recipient_longitude"]);
        assert!(matches!(get_shipment("RW-NAN-C"), Err(ShipmentError::ShipmentNotFound(_))));
    }

    #[test]
    fn repeated_nan_coordinate_never_grows_history() {
        let created = create_shipment(sample_init_data("RW-NAN-U")).unwrap();
        let patch = ShipmentPatch { latitude: Some(f64::NAN), ..Default::default() };

        for _ in 0..2 {
            let fields = field_names(update_shipment("RW-NAN-U", patch.clone()).unwrap_err());
            assert_eq!(fields, vec!["latitude"]);
        }
        let stored = get_shipment("RW-NAN-U").unwrap();
        assert_eq!(stored.history.len(), 1);
        assert_eq!(stored, created);
    }

    #[test]
    fn delete_returns_the_removed_record() {
        let created = create_shipment(sample_init_data("RW-DEL")).unwrap();
        assert_eq!(delete_shipment("RW-DEL").unwrap(), created);
        assert!(matches!(get_shipment("RW-DEL"), Err(ShipmentError::ShipmentNotFound(_))));
    }

    #[test]
    fn list_pages_and_filters_by_status() {
        for n in 0..5 {
            create_shipment(sample_init_data(&format!("RW-L{}", n))).unwrap();
        }
        update_shipment("RW-L1", status_patch("delivered")).unwrap();
        update_shipment("RW-L3", status_patch("Delivered")).unwrap();

        let (page, total) = list_shipments(1, 2, None);
        assert_eq!(total, 5);
        let numbers: Vec<&str> = page.iter().map(|s| s.tracking_number.as_str()).collect();
        assert_eq!(numbers, vec!["RW-L1", "RW-L2"]);

        let (delivered, total) = list_shipments(0, DEFAULT_PAGE_SIZE, Some("DELIVERED"));
        assert_eq!(total, 2);
        assert_eq!(delivered.len(), 2);
    }

    proptest! {
        #[test]
        fn history_only_grows_and_keeps_prior_entries(
            statuses in prop::collection::vec(
                prop::sample::select(vec![
                    "pending", "processing", "in-transit", "out-for-delivery",
                    "on-hold", "delivered", "cancelled",
                ]),
                1..8,
            )
        ) {
            let tracking = "RW-PROP";
            let _ = delete_shipment(tracking);
            create_shipment(sample_init_data(tracking)).unwrap();

            let mut previous = get_shipment(tracking).unwrap().history;
            for status in statuses {
                let before = get_shipment(tracking).unwrap();
                let after = update_shipment(tracking, status_patch(status)).unwrap();

                prop_assert!(after.history.len() >= previous.len());
                prop_assert_eq!(&after.history[..previous.len()], &previous[..]);
                let expected_growth = if before.status == status { 0 } else { 1 };
                prop_assert_eq!(after.history.len(), previous.len() + expected_growth);
                prop_assert_eq!(&after.status, status);
                previous = after.history;
            }
            delete_shipment(tracking).unwrap();
        }
    }
}
