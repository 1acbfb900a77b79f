use crate::models::common::TimestampNs;

/// Returns the current Internet Computer time as nanoseconds since epoch.
#[cfg(target_arch = "wasm32")]
pub fn get_current_time_ns() -> TimestampNs {
    ic_cdk::api::time()
}

/// Off-chain (unit tests) the system clock stands in for IC time.
#[cfg(not(target_arch = "wasm32"))]
pub fn get_current_time_ns() -> TimestampNs {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
