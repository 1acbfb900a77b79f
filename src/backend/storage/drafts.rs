// src/backend/storage/drafts.rs
use crate::models::draft::DraftShipment;
use crate::storage::memory::{get_drafts_memory, Memory};
use crate::storage::storable::{Cbor, StorableString};
use ic_stable_structures::StableBTreeMap;
use std::cell::RefCell;

type StorableDraft = Cbor<DraftShipment>;

thread_local! {
    /// Drafts: Key = tracking number reserved by the draft, Value = DraftShipment
    pub static DRAFTS: RefCell<StableBTreeMap<StorableString, StorableDraft, Memory>> = RefCell::new(
        StableBTreeMap::init(get_drafts_memory())
    );
}

/// Inserts or replaces a draft, returning the previous version if any.
pub fn insert_draft(draft: &DraftShipment) -> Option<DraftShipment> {
    let key = Cbor(draft.tracking_number.clone());
    DRAFTS.with(|map_ref| {
        map_ref.borrow_mut()
            .insert(key, Cbor(draft.clone()))
            .map(|prev| prev.0)
    })
}

pub fn get_draft(tracking_number: &str) -> Option<DraftShipment> {
    let key = Cbor(tracking_number.to_string());
    DRAFTS.with(|map_ref| map_ref.borrow().get(&key).map(|cbor| cbor.0))
}

pub fn remove_draft(tracking_number: &str) -> Option<DraftShipment> {
    let key = Cbor(tracking_number.to_string());
    DRAFTS.with(|map_ref| map_ref.borrow_mut().remove(&key).map(|cbor| cbor.0))
}

/// All drafts, most recently edited first.
pub fn list_drafts() -> Vec<DraftShipment> {
    let mut drafts: Vec<DraftShipment> = DRAFTS.with(|map_ref| {
        map_ref.borrow().iter().map(|(_key, value)| value.0).collect()
    });
    drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    drafts
}
