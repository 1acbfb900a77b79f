// src/backend/storage/shipments.rs
use crate::error::ShipmentError;
use crate::models::shipment::Shipment;
use crate::storage::memory::{get_shipments_memory, Memory};
use crate::storage::storable::{Cbor, StorableString};
use ic_stable_structures::StableBTreeMap;
use std::cell::RefCell;

type StorableShipment = Cbor<Shipment>;

thread_local! {
    /// Shipments: Key = tracking number, Value = full shipment document (history embedded)
    pub static SHIPMENTS: RefCell<StableBTreeMap<StorableString, StorableShipment, Memory>> = RefCell::new(
        StableBTreeMap::init(get_shipments_memory())
    );
}

fn key(tracking_number: &str) -> StorableString {
    Cbor(tracking_number.to_string())
}

pub fn contains_shipment(tracking_number: &str) -> bool {
    SHIPMENTS.with(|map_ref| map_ref.borrow().contains_key(&key(tracking_number)))
}

/// Inserts a shipment only if its tracking number is free.
pub fn insert_new_shipment(shipment: &Shipment) -> Result<(), ShipmentError> {
    SHIPMENTS.with(|map_ref| {
        let mut map = map_ref.borrow_mut();
        let k = key(&shipment.tracking_number);
        if map.contains_key(&k) {
            return Err(ShipmentError::TrackingNumberTaken(shipment.tracking_number.clone()));
        }
        map.insert(k, Cbor(shipment.clone()));
        Ok(())
    })
}

pub fn get_shipment(tracking_number: &str) -> Option<Shipment> {
    SHIPMENTS.with(|map_ref| {
        map_ref.borrow()
            .get(&key(tracking_number))
            .map(|cbor| cbor.0)
    })
}

/// Read-modify-write of one shipment inside a single borrow. The document is
/// written back only when `f` returns `Ok`; on `Err` storage is untouched.
pub fn update_shipment_with<F, R>(tracking_number: &str, f: F) -> Result<R, ShipmentError>
where
    F: FnOnce(&mut Shipment) -> Result<R, ShipmentError>,
{
    SHIPMENTS.with(|map_ref| {
        let mut map = map_ref.borrow_mut();
        let k = key(tracking_number);
        let mut shipment = map
            .get(&k)
            .map(|cbor| cbor.0)
            .ok_or_else(|| ShipmentError::ShipmentNotFound(tracking_number.to_string()))?;
        let result = f(&mut shipment)?;
        map.insert(k, Cbor(shipment));
        Ok(result)
    })
}

/// Removes a shipment, returning the deleted document.
pub fn remove_shipment(tracking_number: &str) -> Option<Shipment> {
    SHIPMENTS.with(|map_ref| {
        map_ref.borrow_mut()
            .remove(&key(tracking_number))
            .map(|cbor| cbor.0)
    })
}

/// Page of shipments in key order (CBOR keys sort shorter tracking numbers
/// first, then bytewise), plus the total that matched.
pub fn list_shipments<P>(offset: usize, limit: usize, predicate: P) -> (Vec<Shipment>, u64)
where
    P: Fn(&Shipment) -> bool,
{
    let mut page = Vec::new();
    let mut total: u64 = 0;
    SHIPMENTS.with(|map_ref| {
        let map = map_ref.borrow();
        for (_key, value) in map.iter() {
            let shipment: Shipment = value.0;
            if !predicate(&shipment) {
                continue;
            }
            if total as usize >= offset && page.len() < limit {
                page.push(shipment);
            }
            total += 1;
        }
    });
    (page, total)
}

pub fn shipment_count() -> u64 {
    SHIPMENTS.with(|map_ref| map_ref.borrow().len())
}
