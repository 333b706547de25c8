//! Scanner bridge command surface and session lifecycle.
//!
//! [`ScannerBridge`] owns everything the adapter shares between the host
//! call path and the dispatcher tasks — the two subsystem handles, the
//! dedup cache, the single-read flag, and the session bookkeeping — as
//! instance fields, so multiple independent bridges can coexist and
//! tests stay deterministic.
//!
//! # Architecture
//!
//! ```text
//!  Host commands ──► ScannerBridge ──► AnyRfidReader / AnyBarcodeReader
//!                        │                      │ broadcasts
//!                        │                      ▼
//!                        │              dispatcher tasks
//!                        │                      │
//!                        ▼                      ▼
//!                   Event Channel (mpsc) ──► Host application
//! ```
//!
//! `connect()` only spawns the session setup; the caller's success tells
//! it nothing about readiness. Readiness arrives later as a
//! `ReaderStatus { status: true }` event once the RFID service announces
//! itself and the default configuration has been applied.

use crate::config::BridgeConfig;
use crate::dispatch;
use crate::error::{BridgeError, Result};
use crate::events::ScannerEvent;
use scanbridge_core::Epc;
use scanbridge_core::constants::{
    EPC_WRITE_WORD_COUNT, EPC_WRITE_WORD_OFFSET, WRITE_ACCESS_PASSWORD_HEX,
};
use scanbridge_sdk::{
    AnyBarcodeReader, AnyRfidReader, BarcodeReader, MemoryBank, RfidReader, TagWriteRequest,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Reader identity and status snapshot returned by
/// [`ScannerBridge::device_details`].
///
/// Serialized keys match the host application's legacy payload: the
/// serial number travels under `mac`, battery percent under `power`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    /// Reader model name.
    pub name: String,

    /// Reader serial number.
    pub mac: String,

    /// Current antenna transmit power level.
    pub antenna_level: i32,

    /// Battery charge in percent, or -1 when the battery query failed.
    pub power: i32,
}

/// The running dispatcher tasks of one session.
struct Session {
    rfid_task: JoinHandle<()>,
    barcode_task: JoinHandle<()>,
}

impl Session {
    fn abort(&self) {
        self.rfid_task.abort();
        self.barcode_task.abort();
    }
}

/// State shared between the command surface and the dispatcher tasks.
pub(crate) struct BridgeShared {
    pub(crate) rfid: Mutex<AnyRfidReader>,
    pub(crate) barcode: Mutex<AnyBarcodeReader>,
    pub(crate) single_read: AtomicBool,
    pub(crate) config: BridgeConfig,
    seen_tags: std::sync::Mutex<HashSet<String>>,
    session: std::sync::Mutex<Option<Session>>,
    events: mpsc::Sender<ScannerEvent>,
}

impl BridgeShared {
    /// Send an event to the host; a dropped receiver only logs.
    pub(crate) async fn emit(&self, event: ScannerEvent) {
        if self.events.send(event).await.is_err() {
            debug!("event receiver dropped; discarding event");
        }
    }

    /// Record an EPC sighting. Returns `true` the first time an EPC is
    /// seen since the last clear; the test and the insert happen under
    /// one guard.
    pub(crate) fn mark_seen(&self, epc: &str) -> bool {
        self.seen_tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(epc.to_string())
    }

    fn clear_seen(&self) {
        self.seen_tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn take_session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn store_session(&self, session: Session) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Start session setup on a detached task. Used by `connect`,
    /// `reconnect`, and the device-attached notification.
    pub(crate) fn spawn_connect(shared: &Arc<BridgeShared>) {
        let shared = Arc::clone(shared);
        tokio::spawn(async move {
            if let Err(error) = BridgeShared::start_session(&shared).await {
                warn!(%error, "session setup failed");
                shared
                    .emit(ScannerEvent::ReaderStatus {
                        status: false,
                        error: Some(error.to_string()),
                    })
                    .await;
            }
        });
    }

    /// Open both subsystems, register the dispatcher subscriptions, and
    /// start the dispatcher tasks.
    ///
    /// A repeat connect supersedes the previous session: its tasks are
    /// aborted here, and re-subscribing closes their channels anyway.
    async fn start_session(shared: &Arc<BridgeShared>) -> Result<()> {
        if let Some(previous) = shared.take_session() {
            previous.abort();
        }

        let rfid_notifications = {
            let mut rfid = shared.rfid.lock().await;
            rfid.open().await?;
            rfid.subscribe().await
        };

        let barcode_notifications = {
            let mut barcode = shared.barcode.lock().await;
            match barcode.open().await {
                Ok(()) => barcode.subscribe().await,
                Err(error) => {
                    drop(barcode);
                    // Both subsystems or neither: release the RFID
                    // binding acquired above before reporting.
                    let mut rfid = shared.rfid.lock().await;
                    if let Err(close_error) = rfid.close().await {
                        warn!(error = %close_error, "RFID release failed during rollback");
                    }
                    return Err(error.into());
                }
            }
        };

        let rfid_task = tokio::spawn(dispatch::rfid_loop(
            Arc::clone(shared),
            rfid_notifications,
        ));
        let barcode_task = tokio::spawn(dispatch::barcode_loop(
            Arc::clone(shared),
            barcode_notifications,
        ));

        shared.store_session(Session {
            rfid_task,
            barcode_task,
        });
        Ok(())
    }
}

/// Bridge between the host application and the vendor scanner SDK.
///
/// Construction hands back the bridge and the receiving end of its event
/// channel:
///
/// ```no_run
/// use scanbridge::ScannerBridge;
/// use scanbridge_sdk::mock::{MockBarcodeReader, MockRfidReader};
/// use scanbridge_sdk::{AnyBarcodeReader, AnyRfidReader};
///
/// #[tokio::main]
/// async fn main() -> scanbridge::Result<()> {
///     let (rfid, _rfid_handle) = MockRfidReader::new();
///     let (barcode, _barcode_handle) = MockBarcodeReader::new();
///
///     let (bridge, mut events) = ScannerBridge::new(
///         AnyRfidReader::Mock(rfid),
///         AnyBarcodeReader::Mock(barcode),
///     );
///
///     bridge.connect()?;
///
///     while let Some(event) = events.recv().await {
///         println!("{:?}", event);
///     }
///     Ok(())
/// }
/// ```
pub struct ScannerBridge {
    shared: Arc<BridgeShared>,
}

impl ScannerBridge {
    /// Create a bridge with the default reader configuration.
    pub fn new(
        rfid: AnyRfidReader,
        barcode: AnyBarcodeReader,
    ) -> (Self, mpsc::Receiver<ScannerEvent>) {
        Self::with_config(rfid, barcode, BridgeConfig::default())
    }

    /// Create a bridge with a custom reader configuration.
    pub fn with_config(
        rfid: AnyRfidReader,
        barcode: AnyBarcodeReader,
        config: BridgeConfig,
    ) -> (Self, mpsc::Receiver<ScannerEvent>) {
        let (events, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let shared = Arc::new(BridgeShared {
            rfid: Mutex::new(rfid),
            barcode: Mutex::new(barcode),
            single_read: AtomicBool::new(false),
            config,
            seen_tags: std::sync::Mutex::new(HashSet::new()),
            session: std::sync::Mutex::new(None),
            events,
        });

        (Self { shared }, event_rx)
    }

    /// Start a session on a detached background task.
    ///
    /// Returns as soon as the setup task is spawned; success here does
    /// NOT mean the reader is ready. Subsystem readiness arrives later
    /// as a [`ScannerEvent::ReaderStatus`] event, and setup failures are
    /// reported the same way. Calling while already connected starts a
    /// fresh attempt.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn connect(&self) -> Result<()> {
        BridgeShared::spawn_connect(&self.shared);
        Ok(())
    }

    /// Fire-and-forget [`connect`](Self::connect); failures are logged
    /// and swallowed.
    pub fn reconnect(&self) {
        if let Err(error) = self.connect() {
            warn!(%error, "reconnect failed");
        }
    }

    /// Stop the dispatcher tasks, release both subsystems, and report
    /// the reader gone.
    ///
    /// Safe to call when already disconnected: releasing unattached
    /// subsystems is a no-op and no status event is emitted. When a
    /// session existed, both subsystems are released even if one fails,
    /// and the first failure is returned.
    pub async fn disconnect(&self) -> Result<()> {
        let session = self.shared.take_session();
        let had_session = session.is_some();
        if let Some(session) = session {
            session.abort();
        }

        let mut first_error: Option<BridgeError> = None;

        {
            let mut rfid = self.shared.rfid.lock().await;
            if let Err(error) = rfid.close().await {
                warn!(%error, "RFID release failed");
                first_error.get_or_insert(error.into());
            }
        }
        {
            let mut barcode = self.shared.barcode.lock().await;
            if let Err(error) = barcode.close().await {
                warn!(%error, "barcode release failed");
                first_error.get_or_insert(error.into());
            }
        }

        if had_session {
            self.shared
                .emit(ScannerEvent::ReaderStatus {
                    status: false,
                    error: None,
                })
                .await;
            if let Some(error) = first_error {
                return Err(error);
            }
        }
        Ok(())
    }

    /// Current RFID connection status; `false` when unattached, never
    /// errors.
    pub async fn is_connected(&self) -> bool {
        self.shared.rfid.lock().await.connection_status().await
    }

    /// Reader identity and status snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotConnected`] without an active session.
    /// A failing battery query does not fail the call: `power` comes
    /// back as -1.
    pub async fn device_details(&self) -> Result<DeviceDetails> {
        let rfid = self.shared.rfid.lock().await;
        if !rfid.connection_status().await {
            return Err(BridgeError::NotConnected);
        }

        let info = rfid.device_info().await?;
        let antenna_level = rfid.tx_power().await?;
        let power = match rfid.battery_percent().await {
            Ok(percent) => i32::from(percent),
            Err(error) => {
                debug!(%error, "battery query failed");
                -1
            }
        };

        Ok(DeviceDetails {
            name: info.model,
            mac: info.serial_number,
            antenna_level,
            power,
        })
    }

    /// Set the antenna transmit power level; returns the applied level.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotConnected`] without an active session,
    /// or the vendor diagnostic when the reader rejects the level.
    pub async fn set_antenna_level(&self, level: i32) -> Result<i32> {
        let mut rfid = self.shared.rfid.lock().await;
        if !rfid.connection_status().await {
            return Err(BridgeError::NotConnected);
        }
        Ok(rfid.set_tx_power(level).await?)
    }

    /// Forget every EPC seen so far; each becomes emittable again.
    pub fn clear(&self) {
        self.shared.clear_seen();
    }

    /// Toggle single-read mode: emit the first tag stronger than the
    /// RSSI threshold and stop the scan, instead of emitting every
    /// distinct tag.
    pub fn set_single_read(&self, enable: bool) {
        self.shared.single_read.store(enable, Ordering::Relaxed);
    }

    /// Enable or disable the physical trigger button.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotConnected`] without an active session,
    /// or the vendor diagnostic on rejection.
    pub async fn set_enabled(&self, enable: bool) -> Result<bool> {
        let mut rfid = self.shared.rfid.lock().await;
        if !rfid.connection_status().await {
            return Err(BridgeError::NotConnected);
        }
        rfid.enable_trigger(enable).await?;
        Ok(true)
    }

    /// Write `new_epc` over the tag currently holding `old_epc`, using
    /// the default all-zero access password.
    ///
    /// The write outcome is delivered as a
    /// [`ScannerEvent::WriteTagStatus`] event carrying the vendor
    /// response code, not through the return value.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Epc`] for malformed identifiers (before
    /// any vendor call), [`BridgeError::NotConnected`] without an active
    /// session, or the vendor diagnostic when the write command itself
    /// cannot be issued.
    pub async fn program_tag(&self, old_epc: &str, new_epc: &str) -> Result<()> {
        let old = Epc::parse(old_epc)?;
        let new = Epc::parse(new_epc)?;
        let password = Epc::parse(WRITE_ACCESS_PASSWORD_HEX)?;

        let outcome = {
            let mut rfid = self.shared.rfid.lock().await;
            if !rfid.connection_status().await {
                return Err(BridgeError::NotConnected);
            }

            let request = TagWriteRequest {
                access_password: password.to_bytes(),
                target_epc: old.to_bytes(),
                bank: MemoryBank::Epc,
                word_offset: EPC_WRITE_WORD_OFFSET,
                word_count: EPC_WRITE_WORD_COUNT,
                data: new.to_bytes(),
            };
            rfid.write_tag_epc(&request).await?
        };

        self.shared
            .emit(ScannerEvent::WriteTagStatus {
                status: outcome.is_success(),
                error: outcome.to_string(),
            })
            .await;

        Ok(())
    }
}
