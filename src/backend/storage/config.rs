// src/backend/storage/config.rs
use crate::error::{ShipmentError, ShipmentResult};
use crate::models::init::InitArgs;
use crate::storage::memory::{get_memory, Memory};
use crate::storage::storable::Cbor;
use candid::Principal;
use ic_stable_structures::{memory_manager::MemoryId, StableCell};
use std::cell::RefCell;

// Config cells (unique IDs, see memory.rs)
const ADMINS_MEM_ID: MemoryId = MemoryId::new(25);
const TRACKING_PREFIX_MEM_ID: MemoryId = MemoryId::new(26);
const MIN_CYCLES_THRESHOLD_MEM_ID: MemoryId = MemoryId::new(27);

pub const DEFAULT_TRACKING_PREFIX: &str = "RW";
const DEFAULT_MIN_CYCLES_THRESHOLD: u128 = 10_000_000_000; // 10B cycles

thread_local! {
    /// Principals allowed to use the admin console endpoints
    static ADMINS: RefCell<StableCell<Cbor<Vec<Principal>>, Memory>> = RefCell::new(
        StableCell::init(get_memory(ADMINS_MEM_ID), Cbor(Vec::new()))
            .expect("Failed to initialize admins stable cell")
    );

    /// Prefix for generated tracking numbers
    static TRACKING_PREFIX: RefCell<StableCell<Cbor<String>, Memory>> = RefCell::new(
        StableCell::init(get_memory(TRACKING_PREFIX_MEM_ID), Cbor(DEFAULT_TRACKING_PREFIX.to_string()))
            .expect("Failed to initialize tracking prefix stable cell")
    );

    static MIN_CYCLES_THRESHOLD: RefCell<StableCell<u128, Memory>> = RefCell::new(
        StableCell::init(get_memory(MIN_CYCLES_THRESHOLD_MEM_ID), DEFAULT_MIN_CYCLES_THRESHOLD)
            .expect("Failed to initialize min cycles threshold stable cell")
    );
}

/// Applies install/upgrade arguments. An empty admin list or a missing
/// option leaves the stored value as it is.
pub fn init_config(args: &InitArgs) -> ShipmentResult<()> {
    if !args.admins.is_empty() {
        ADMINS.with(|cell| {
            cell.borrow_mut()
                .set(Cbor(args.admins.clone()))
                .map(|_| ())
                .map_err(|e| ShipmentError::storage("Failed to set admins", e))
        })?;
    }
    if let Some(prefix) = &args.tracking_prefix {
        TRACKING_PREFIX.with(|cell| {
            cell.borrow_mut()
                .set(Cbor(prefix.clone()))
                .map(|_| ())
                .map_err(|e| ShipmentError::storage("Failed to set tracking prefix", e))
        })?;
    }
    if let Some(threshold) = args.min_cycles_threshold {
        MIN_CYCLES_THRESHOLD.with(|cell| {
            cell.borrow_mut()
                .set(threshold)
                .map(|_| ())
                .map_err(|e| ShipmentError::storage("Failed to set min cycles threshold", e))
        })?;
    }
    ic_cdk::println!(
        "INFO: Configuration initialized: Admins={}, Prefix={}, Threshold={}",
        get_admins().len(),
        get_tracking_prefix(),
        get_min_cycles_threshold()
    );
    Ok(())
}

pub fn get_admins() -> Vec<Principal> {
    ADMINS.with(|cell| cell.borrow().get().0.clone())
}

pub fn is_admin(principal: &Principal) -> bool {
    ADMINS.with(|cell| cell.borrow().get().0.contains(principal))
}

pub fn get_tracking_prefix() -> String {
    TRACKING_PREFIX.with(|cell| cell.borrow().get().0.clone())
}

pub fn get_min_cycles_threshold() -> u128 {
    MIN_CYCLES_THRESHOLD.with(|cell| *cell.borrow().get())
}
