// src/backend/utils/guards.rs
use crate::error::ShipmentError;
use crate::storage::config;
use candid::Principal;

/// Checks if the canister has sufficient cycles.
///
/// # Errors
///
/// Returns `ShipmentError::InternalError` if the balance is below the configured threshold.
pub fn check_cycles() -> Result<(), ShipmentError> {
    let balance = ic_cdk::api::canister_balance128();
    let threshold = config::get_min_cycles_threshold();
    if balance < threshold {
        ic_cdk::println!(
            "WARN: Cycle balance low: {} cycles, threshold: {}",
            balance,
            threshold
        );
        Err(ShipmentError::InternalError("Canister cycle balance too low".to_string()))
    } else {
        Ok(())
    }
}

/// Checks that `principal` is one of the configured admins.
///
/// # Errors
///
/// Returns `ShipmentError::NotAuthorized` otherwise.
pub fn check_admin(principal: &Principal) -> Result<(), ShipmentError> {
    if config::is_admin(principal) {
        Ok(())
    } else {
        Err(ShipmentError::NotAuthorized(format!(
            "Caller {} is not an admin",
            principal
        )))
    }
}

/// Named guard for admin-console endpoints.
pub fn admin_guard() -> Result<(), String> {
    check_admin(&ic_cdk::caller()).map_err(|e| e.to_string())
}
