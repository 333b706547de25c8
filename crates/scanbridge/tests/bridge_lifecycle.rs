//! Integration tests for the scanner bridge.
//!
//! These drive the full adapter — command surface, session lifecycle,
//! configuration applier, and event dispatcher — against the mock
//! vendor subsystems, asserting on the events the host application
//! would receive.

use scanbridge::{BridgeError, ScannerBridge, ScannerEvent};
use scanbridge_sdk::mock::{MockBarcodeHandle, MockBarcodeReader, MockRfidHandle, MockRfidReader};
use scanbridge_sdk::{AnyBarcodeReader, AnyRfidReader, Gen2Session, RfidDeviceInfo, WriteOutcome};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

fn new_bridge() -> (
    ScannerBridge,
    mpsc::Receiver<ScannerEvent>,
    MockRfidHandle,
    MockBarcodeHandle,
) {
    let (rfid, rfid_handle) = MockRfidReader::new();
    let (barcode, barcode_handle) = MockBarcodeReader::new();
    let (bridge, events) =
        ScannerBridge::new(AnyRfidReader::Mock(rfid), AnyBarcodeReader::Mock(barcode));
    (bridge, events, rfid_handle, barcode_handle)
}

/// Connect and wait until both dispatcher subscriptions are live.
async fn connect_and_wait(
    bridge: &ScannerBridge,
    rfid_handle: &MockRfidHandle,
    barcode_handle: &MockBarcodeHandle,
) {
    bridge.connect().unwrap();
    rfid_handle.wait_until_subscribed().await;
    barcode_handle.wait_until_subscribed().await;
}

async fn next_event(events: &mut mpsc::Receiver<ScannerEvent>) -> ScannerEvent {
    timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

#[tokio::test]
async fn connect_configures_rfid_and_reports_ready() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    assert!(bridge.is_connected().await);

    rfid_handle.service_connected().await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::ReaderStatus {
            status: true,
            error: None
        }
    );

    let log = rfid_handle.command_log().await;
    let config_start = log
        .iter()
        .position(|c| *c == "reset_to_default")
        .expect("factory reset not applied");
    assert_eq!(
        &log[config_start..config_start + 7],
        &[
            "reset_to_default",
            "set_notification",
            "set_gen2",
            "set_work_mode",
            "set_rfid_mode",
            "set_power_mode",
            "set_rf_link",
        ]
    );
    assert_eq!(rfid_handle.gen2().await.unwrap().session, Gen2Session::S0);
}

#[tokio::test]
async fn rfid_config_failure_aborts_sequence_and_reports_error() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    rfid_handle.fail_command("set_gen2", "RF module busy").await;
    rfid_handle.service_connected().await.unwrap();

    match next_event(&mut events).await {
        ScannerEvent::ReaderStatus {
            status: false,
            error: Some(message),
        } => assert!(message.contains("RF module busy")),
        other => panic!("unexpected event: {:?}", other),
    }

    let log = rfid_handle.command_log().await;
    assert!(log.contains(&"set_gen2"));
    assert!(!log.contains(&"set_work_mode"));
}

#[tokio::test]
async fn barcode_service_connected_configures_and_activates_silently() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    barcode_handle.service_connected().await.unwrap();

    // Wait for the applier to finish
    let mut tries = 0;
    while !barcode_handle.is_active().await {
        tries += 1;
        assert!(tries < 100, "barcode reader was never activated");
        sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(
        barcode_handle.command_log().await.last(),
        Some(&"set_active")
    );

    // Success on the barcode path emits nothing
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn barcode_config_failure_reports_reader_error() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    barcode_handle
        .fail_command("set_output_config", "reader service error")
        .await;
    barcode_handle.service_connected().await.unwrap();

    match next_event(&mut events).await {
        ScannerEvent::ReaderStatus {
            status: false,
            error: Some(message),
        } => assert!(message.contains("reader service error")),
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(!barcode_handle.is_active().await);
}

#[tokio::test]
async fn distinct_epcs_emit_once_each_until_cleared() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    rfid_handle.tag_read("E200001122334455", -35.0).await.unwrap();
    rfid_handle.tag_read("E200001122334455", -36.0).await.unwrap();
    rfid_handle.tag_read("E200AABBCCDDEEFF", -50.0).await.unwrap();
    rfid_handle.tag_read("E200001122334455", -35.0).await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::Tag {
            epc: "E200001122334455".to_string()
        }
    );
    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::Tag {
            epc: "E200AABBCCDDEEFF".to_string()
        }
    );

    // Let the dispatcher drain the repeats; they produce nothing further
    sleep(Duration::from_millis(50)).await;
    assert!(events.try_recv().is_err());

    // After clear() the same EPC is unseen again
    bridge.clear();
    rfid_handle.tag_read("E200001122334455", -35.0).await.unwrap();
    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::Tag {
            epc: "E200001122334455".to_string()
        }
    );
}

#[tokio::test]
async fn single_read_gates_on_rssi_and_stops_scan() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    bridge.set_single_read(true);

    // Below threshold: ignored
    rfid_handle.tag_read("E200001122334455", -55.0).await.unwrap();
    // Above threshold: stops the scan and emits
    rfid_handle.tag_read("E200001122334455", -35.0).await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::Tag {
            epc: "E200001122334455".to_string()
        }
    );
    assert!(events.try_recv().is_err());

    assert!(
        rfid_handle
            .command_log()
            .await
            .contains(&"soft_scan_trigger")
    );
    assert!(!rfid_handle.soft_scan_active().await);
}

#[tokio::test]
async fn single_read_does_not_touch_dedup_cache() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    bridge.set_single_read(true);
    rfid_handle.tag_read("E200001122334455", -30.0).await.unwrap();
    assert!(matches!(
        next_event(&mut events).await,
        ScannerEvent::Tag { .. }
    ));

    // Back in inventory mode the same EPC is still unseen
    bridge.set_single_read(false);
    rfid_handle.tag_read("E200001122334455", -45.0).await.unwrap();
    assert!(matches!(
        next_event(&mut events).await,
        ScannerEvent::Tag { .. }
    ));
}

#[tokio::test]
async fn disconnect_releases_both_subsystems_and_reports_once() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    assert!(rfid_handle.is_open().await);
    assert!(barcode_handle.is_open().await);

    bridge.disconnect().await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::ReaderStatus {
            status: false,
            error: None
        }
    );
    assert!(!rfid_handle.is_open().await);
    assert!(!barcode_handle.is_open().await);
    assert!(!bridge.is_connected().await);

    // A second disconnect is a no-op: no error, no duplicate event
    bridge.disconnect().await.unwrap();
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn disconnect_without_session_is_a_silent_noop() {
    let (bridge, mut events, _rfid_handle, _barcode_handle) = new_bridge();

    bridge.disconnect().await.unwrap();
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn device_details_reflect_reader_state() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    rfid_handle
        .set_device_info(RfidDeviceInfo::new("RK95 UHF", "0123456789AB"))
        .await;
    rfid_handle.set_battery_percent(87).await;

    let details = bridge.device_details().await.unwrap();
    assert_eq!(details.name, "RK95 UHF");
    assert_eq!(details.mac, "0123456789AB");
    assert_eq!(details.antenna_level, 27);
    assert_eq!(details.power, 87);
}

#[tokio::test]
async fn failed_battery_query_reports_power_unknown() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    rfid_handle
        .fail_command("battery_percent", "gauge timeout")
        .await;

    let details = bridge.device_details().await.unwrap();
    assert_eq!(details.power, -1);
}

#[tokio::test]
async fn set_antenna_level_applies_or_surfaces_vendor_error() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    assert_eq!(bridge.set_antenna_level(30).await.unwrap(), 30);
    assert_eq!(rfid_handle.tx_power_level().await, 30);

    rfid_handle
        .fail_command("set_tx_power", "level out of range")
        .await;
    let error = bridge.set_antenna_level(99).await.unwrap_err();
    assert!(error.to_string().contains("level out of range"));
}

#[tokio::test]
async fn set_enabled_controls_the_trigger_button() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    assert!(bridge.set_enabled(true).await.unwrap());
    assert_eq!(rfid_handle.trigger_enabled().await, Some(true));

    assert!(bridge.set_enabled(false).await.unwrap());
    assert_eq!(rfid_handle.trigger_enabled().await, Some(false));
}

#[tokio::test]
async fn program_tag_emits_write_status_with_vendor_code() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    rfid_handle
        .set_write_outcome(WriteOutcome::TimeoutFail)
        .await;

    bridge.program_tag("e2000011", "A1B2C3D4").await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::WriteTagStatus {
            status: false,
            error: "TimeoutFail".to_string()
        }
    );

    let writes = rfid_handle.writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].access_password, vec![0, 0, 0, 0]);
    assert_eq!(writes[0].target_epc, vec![0xE2, 0x00, 0x00, 0x11]);
    assert_eq!(writes[0].data, vec![0xA1, 0xB2, 0xC3, 0xD4]);
    assert_eq!(writes[0].word_offset, 2);
    assert_eq!(writes[0].word_count, 3);
}

#[tokio::test]
async fn program_tag_success_reports_success_status() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    bridge
        .program_tag("E2000011", "A1B2C3D4")
        .await
        .unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::WriteTagStatus {
            status: true,
            error: "OperationSuccess".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_epc_is_rejected_without_a_write() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    let error = bridge.program_tag("E20", "A1B2").await.unwrap_err();
    assert!(matches!(error, BridgeError::Epc(_)));
    assert!(rfid_handle.writes().await.is_empty());
}

#[tokio::test]
async fn detach_reports_reader_gone() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;
    rfid_handle.device_detached().await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::ReaderStatus {
            status: false,
            error: None
        }
    );
}

#[tokio::test]
async fn attach_starts_a_fresh_session() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    let opens = |log: &[&str]| log.iter().filter(|c| **c == "open").count();
    assert_eq!(opens(&rfid_handle.command_log().await), 1);

    rfid_handle.device_attached().await.unwrap();

    let mut tries = 0;
    while opens(&rfid_handle.command_log().await) < 2 {
        tries += 1;
        assert!(tries < 100, "attach did not restart the session");
        sleep(Duration::from_millis(10)).await;
    }
    assert!(bridge.is_connected().await);
}

#[tokio::test]
async fn trigger_key_events_are_forwarded() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    rfid_handle.trigger_key(true).await.unwrap();
    rfid_handle.trigger_key(false).await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::TriggerStatus { status: true }
    );
    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::TriggerStatus { status: false }
    );
}

#[tokio::test]
async fn decoded_barcodes_are_forwarded() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    connect_and_wait(&bridge, &rfid_handle, &barcode_handle).await;

    barcode_handle.decoded("4006381333931").await.unwrap();

    assert_eq!(
        next_event(&mut events).await,
        ScannerEvent::Barcode {
            data: "4006381333931".to_string()
        }
    );
}

#[tokio::test]
async fn rfid_open_failure_is_reported_as_reader_status() {
    let (bridge, mut events, rfid_handle, _barcode_handle) = new_bridge();

    rfid_handle.fail_command("open", "service bind refused").await;
    bridge.connect().unwrap();

    match next_event(&mut events).await {
        ScannerEvent::ReaderStatus {
            status: false,
            error: Some(message),
        } => assert!(message.contains("service bind refused")),
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(!bridge.is_connected().await);
}

#[tokio::test]
async fn barcode_open_failure_rolls_back_the_rfid_binding() {
    let (bridge, mut events, rfid_handle, barcode_handle) = new_bridge();

    barcode_handle
        .fail_command("open", "reader service unavailable")
        .await;
    bridge.connect().unwrap();

    match next_event(&mut events).await {
        ScannerEvent::ReaderStatus {
            status: false,
            error: Some(message),
        } => assert!(message.contains("reader service unavailable")),
        other => panic!("unexpected event: {:?}", other),
    }

    // Both subsystems or neither
    assert!(!rfid_handle.is_open().await);
    assert!(!bridge.is_connected().await);
}

#[tokio::test]
async fn reconnect_is_fire_and_forget() {
    let (bridge, _events, rfid_handle, barcode_handle) = new_bridge();

    bridge.reconnect();
    rfid_handle.wait_until_subscribed().await;
    barcode_handle.wait_until_subscribed().await;

    assert!(bridge.is_connected().await);
}
