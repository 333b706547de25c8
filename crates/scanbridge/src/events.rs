//! Normalized events emitted to the host application.

use serde::{Deserialize, Serialize};

/// One event on the bridge's outward channel.
///
/// Serialization preserves the host application's channel names
/// (`READER_STATUS`, `TAG`, ...) and payload keys, so the bridge stays a
/// drop-in replacement for the module it supersedes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ScannerEvent {
    /// Reader became ready (`status: true`) or unavailable; `error`
    /// carries the vendor diagnostic when a failure caused the change.
    ReaderStatus {
        status: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// Physical trigger button press (`true`) or release (`false`).
    TriggerStatus { status: bool },

    /// Outcome of a tag write; `error` is the vendor response code name.
    WriteTagStatus { status: bool, error: String },

    /// One inventory read that passed the dedup / single-read gate.
    Tag { epc: String },

    /// One decoded barcode.
    Barcode { data: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScannerEvent::ReaderStatus { status: true, error: None }, "READER_STATUS")]
    #[case(ScannerEvent::TriggerStatus { status: false }, "TRIGGER_STATUS")]
    #[case(ScannerEvent::WriteTagStatus { status: true, error: "OperationSuccess".into() }, "WRITE_TAG_STATUS")]
    #[case(ScannerEvent::Tag { epc: "E2001234".into() }, "TAG")]
    #[case(ScannerEvent::Barcode { data: "4006381333931".into() }, "BARCODE")]
    fn channel_names_match_host_contract(#[case] event: ScannerEvent, #[case] channel: &str) {
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(&format!(r#""type":"{}""#, channel)));
    }

    #[test]
    fn reader_status_serializes_with_host_channel_name() {
        let event = ScannerEvent::ReaderStatus {
            status: true,
            error: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"READER_STATUS","status":true}"#);
    }

    #[test]
    fn reader_status_error_is_included_when_present() {
        let event = ScannerEvent::ReaderStatus {
            status: false,
            error: Some("set_gen2 failed: RF module busy".to_string()),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""error":"set_gen2 failed: RF module busy""#));
    }

    #[test]
    fn tag_event_shape() {
        let event = ScannerEvent::Tag {
            epc: "E200001122334455".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"TAG","epc":"E200001122334455"}"#);
    }

    #[test]
    fn write_tag_status_round_trip() {
        let event = ScannerEvent::WriteTagStatus {
            status: false,
            error: "TimeoutFail".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with(r#"{"type":"WRITE_TAG_STATUS""#));
        let back: ScannerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
