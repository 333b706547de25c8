//! Vendor notification demultiplexer.
//!
//! One task per subsystem drains that subsystem's notification channel
//! and routes each notification to exactly one arm: configure on
//! service-connected, gate tag reads through the single-read/dedup
//! logic, forward trigger and decode data, and log the informational
//! events that have no outward counterpart.
//!
//! The loops end when their channel closes — which happens when the
//! session is superseded by a fresh connect (re-subscription replaces
//! the channel) or torn down by disconnect.

use crate::bridge::BridgeShared;
use crate::config;
use crate::events::ScannerEvent;
use scanbridge_core::constants::SINGLE_READ_RSSI_THRESHOLD_DBM;
use scanbridge_sdk::{BarcodeNotification, RfidNotification, RfidReader, TagRead};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub(crate) async fn rfid_loop(
    shared: Arc<BridgeShared>,
    mut notifications: mpsc::Receiver<RfidNotification>,
) {
    while let Some(notification) = notifications.recv().await {
        handle_rfid(&shared, notification).await;
    }
    debug!("RFID notification channel closed");
}

async fn handle_rfid(shared: &Arc<BridgeShared>, notification: RfidNotification) {
    match notification {
        RfidNotification::ServiceConnected => {
            let result = {
                let mut rfid = shared.rfid.lock().await;
                config::apply_rfid_defaults(&mut *rfid, &shared.config.rfid).await
            };
            match result {
                Ok(()) => {
                    info!("RFID service connected and configured");
                    shared
                        .emit(ScannerEvent::ReaderStatus {
                            status: true,
                            error: None,
                        })
                        .await;
                }
                Err(error) => {
                    warn!(%error, "RFID configuration failed");
                    shared
                        .emit(ScannerEvent::ReaderStatus {
                            status: false,
                            error: Some(error.to_string()),
                        })
                        .await;
                }
            }
        }
        RfidNotification::TagData(read) => handle_tag(shared, read).await,
        RfidNotification::TriggerKey { pressed } => {
            shared
                .emit(ScannerEvent::TriggerStatus { status: pressed })
                .await;
        }
        RfidNotification::DeviceAttached => {
            info!("reader grip attached; starting fresh session");
            BridgeShared::spawn_connect(shared);
        }
        RfidNotification::DeviceDetached => {
            info!("reader grip detached");
            shared
                .emit(ScannerEvent::ReaderStatus {
                    status: false,
                    error: None,
                })
                .await;
        }
        RfidNotification::PowerStatus {
            external_power,
            cradled,
        } => {
            debug!(external_power, cradled, "reader power status changed");
        }
        RfidNotification::DeviceEvent(kind) => {
            info!(event = %kind, "reader device event");
        }
        other => debug!(?other, "unhandled RFID notification"),
    }
}

/// Gate one inventory read.
///
/// Single-read mode: the first read stronger than the RSSI threshold
/// stops the active scan and is emitted; weaker reads are dropped.
/// Otherwise: emit on first sighting since the last clear, per the
/// dedup cache.
async fn handle_tag(shared: &Arc<BridgeShared>, read: TagRead) {
    if shared.single_read.load(Ordering::Relaxed) {
        if read.rssi > SINGLE_READ_RSSI_THRESHOLD_DBM {
            {
                let mut rfid = shared.rfid.lock().await;
                if let Err(error) = rfid.soft_scan_trigger(false).await {
                    warn!(%error, "failed to stop soft scan");
                }
            }
            shared.emit(ScannerEvent::Tag { epc: read.epc }).await;
        }
    } else if shared.mark_seen(&read.epc) {
        shared.emit(ScannerEvent::Tag { epc: read.epc }).await;
    }
}

pub(crate) async fn barcode_loop(
    shared: Arc<BridgeShared>,
    mut notifications: mpsc::Receiver<BarcodeNotification>,
) {
    while let Some(notification) = notifications.recv().await {
        handle_barcode(&shared, notification).await;
    }
    debug!("barcode notification channel closed");
}

async fn handle_barcode(shared: &Arc<BridgeShared>, notification: BarcodeNotification) {
    match notification {
        BarcodeNotification::ServiceConnected => {
            let result = {
                let mut barcode = shared.barcode.lock().await;
                config::apply_barcode_defaults(&mut *barcode, &shared.config.barcode).await
            };
            match result {
                // Only failures are reported outward on this path
                Ok(()) => info!("barcode service connected and configured"),
                Err(error) => {
                    warn!(%error, "barcode configuration failed");
                    shared
                        .emit(ScannerEvent::ReaderStatus {
                            status: false,
                            error: Some(error.to_string()),
                        })
                        .await;
                }
            }
        }
        BarcodeNotification::Decoded(data) => {
            shared.emit(ScannerEvent::Barcode { data }).await;
        }
        other => debug!(?other, "unhandled barcode notification"),
    }
}
