// src/backend/utils/crypto.rs

use crate::error::ShipmentError;
use ic_cdk::api::management_canister::main::raw_rand;

/// Random bytes per generated tracking number (10 hex chars).
pub const TRACKING_RANDOM_BYTES: usize = 5;

/// Generates random bytes using `raw_rand`.
pub async fn generate_random_bytes(num_bytes: usize) -> Result<Vec<u8>, ShipmentError> {
    // raw_rand returns 32 bytes per call.
    if num_bytes > 32 {
        return Err(ShipmentError::InternalError("Cannot request more than 32 random bytes from raw_rand in one call".to_string()));
    }
    let (bytes,) = raw_rand().await.map_err(|(code, msg)| {
        ShipmentError::InternalError(format!("raw_rand failed: code={:?}, msg={}", code, msg))
    })?;
    if bytes.len() < num_bytes {
        return Err(ShipmentError::InternalError("raw_rand returned too few bytes".to_string()));
    }
    Ok(bytes[..num_bytes].to_vec())
}

/// `{prefix}{upper-case hex of bytes}`, e.g. `RW3FA09C1B2E`.
pub fn format_tracking_number(prefix: &str, bytes: &[u8]) -> String {
    format!("{}{}", prefix, hex::encode_upper(bytes))
}

/// Draws a fresh tracking number. Uniqueness is not checked here; create
/// reports a collision and the caller draws again.
pub async fn generate_tracking_number(prefix: &str) -> Result<String, ShipmentError> {
    let bytes = generate_random_bytes(TRACKING_RANDOM_BYTES).await?;
    Ok(format_tracking_number(prefix, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payloads::validate_tracking_number;

    #[test]
    fn formatted_numbers_are_valid_tracking_numbers() {
        let number = format_tracking_number("RW", &[0x3f, 0xa0, 0x9c, 0x1b, 0x2e]);
        assert_eq!(number, "RW3FA09C1B2E");
        assert!(validate_tracking_number(&number).is_ok());
    }
}
