use candid::{CandidType, Principal};
use serde::Deserialize;

/// Install/upgrade arguments. Absent values keep the stored (or default) setting.
#[derive(CandidType, Deserialize, Debug, Clone, Default)]
pub struct InitArgs {
    pub admins: Vec<Principal>,
    pub tracking_prefix: Option<String>,
    pub min_cycles_threshold: Option<u128>,
}
