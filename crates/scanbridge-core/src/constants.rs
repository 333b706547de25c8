//! Fixed operating constants for the scanner bridge.
//!
//! These values mirror the handheld reader's factory tuning. Changing
//! them changes the bridge's observable behavior (single-read gating,
//! tag programming layout), so they are centralized here rather than
//! scattered through the adapter.

// ============================================================================
// Single-read mode
// ============================================================================

/// RSSI threshold for single-read mode (dBm).
///
/// While single-read mode is active, only a tag read stronger than this
/// threshold stops the scan and produces a tag event. Reads at or below
/// the threshold are discarded. -40 dBm corresponds to a tag within a
/// few centimeters of the antenna on this reader class.
pub const SINGLE_READ_RSSI_THRESHOLD_DBM: f64 = -40.0;

// ============================================================================
// Tag programming
// ============================================================================

/// Access password sent with every EPC write.
///
/// The bridge always programs tags with the default (all-zero) access
/// password; password management is out of scope for the adapter.
pub const WRITE_ACCESS_PASSWORD_HEX: &str = "00000000";

/// Word offset of the EPC field within the EPC memory bank.
///
/// Words 0-1 hold CRC and PC; the EPC proper starts at word 2 per the
/// Gen2 memory map.
pub const EPC_WRITE_WORD_OFFSET: u32 = 2;

/// Number of 16-bit words carried by the EPC write command.
pub const EPC_WRITE_WORD_COUNT: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_password_is_all_zero_bytes() {
        let bytes = crate::Epc::parse(WRITE_ACCESS_PASSWORD_HEX)
            .unwrap()
            .to_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
    }

    #[test]
    fn threshold_is_negative_dbm() {
        assert!(SINGLE_READ_RSSI_THRESHOLD_DBM < 0.0);
    }
}
