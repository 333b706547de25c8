//! Vendor SDK trait definitions.
//!
//! These traits establish the contract between the scanner bridge and
//! the two vendor subsystems (RFID module, barcode decoder service),
//! enabling substitution between mock and real service-backed
//! implementations.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT), eliminating the need for the `async_trait` macro. They are
//! therefore NOT object-safe; use the enum wrappers in
//! [`devices`](crate::devices) where a storable concrete type is needed.

use crate::error::Result;
use crate::notification::{BarcodeNotification, RfidNotification};
use crate::types::{
    BarcodeOutputConfig, BeepMode, Gen2Config, PowerMode, RfLinkProfile, RfidDeviceInfo, RfidMode,
    RfidNotificationConfig, TagWriteRequest, WorkMode, WriteOutcome,
};
use tokio::sync::mpsc;

/// UHF RFID module abstraction.
///
/// Lifecycle: [`open`](RfidReader::open) binds the vendor service and
/// returns without waiting for it to come up; readiness is announced
/// later through [`RfidNotification::ServiceConnected`] on the
/// subscription channel. [`close`](RfidReader::close) releases the
/// binding and drops the subscriber.
///
/// Every configuration call maps to one vendor entry point. A failure
/// carries the vendor's last-error string in
/// [`SdkError::CommandFailed`](crate::SdkError::CommandFailed).
pub trait RfidReader: Send + Sync {
    /// Bind the RFID service.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor service rejects the binding.
    async fn open(&mut self) -> Result<()>;

    /// Release the RFID service binding. Safe to call when not bound.
    async fn close(&mut self) -> Result<()>;

    /// Current connection status as reported by the service.
    ///
    /// Returns `false` when the service is not bound; never errors.
    async fn connection_status(&self) -> bool;

    /// Obtain a fresh notification channel.
    ///
    /// Replaces any previous subscription: the old receiver closes, so a
    /// consumer draining it observes end-of-stream and can stop.
    async fn subscribe(&mut self) -> mpsc::Receiver<RfidNotification>;

    /// Reset the module to factory defaults.
    async fn reset_to_default(&mut self) -> Result<()>;

    /// Apply notification preferences (beep, LED, alerts).
    async fn set_notification(&mut self, config: &RfidNotificationConfig) -> Result<()>;

    /// Apply Gen2 air-interface parameters.
    async fn set_gen2(&mut self, config: &Gen2Config) -> Result<()>;

    /// Select the work mode.
    async fn set_work_mode(&mut self, mode: WorkMode) -> Result<()>;

    /// Select the RFID scan mode.
    async fn set_rfid_mode(&mut self, mode: RfidMode) -> Result<()>;

    /// Select the power mode.
    async fn set_power_mode(&mut self, mode: PowerMode) -> Result<()>;

    /// Select the RF link profile.
    async fn set_rf_link(&mut self, profile: RfLinkProfile) -> Result<()>;

    /// Reader identity (model, serial number).
    async fn device_info(&self) -> Result<RfidDeviceInfo>;

    /// Battery charge in percent.
    async fn battery_percent(&self) -> Result<u8>;

    /// Current antenna transmit power level.
    async fn tx_power(&self) -> Result<i32>;

    /// Set the antenna transmit power level; returns the applied level.
    async fn set_tx_power(&mut self, level: i32) -> Result<i32>;

    /// Enable or disable the physical trigger button.
    async fn enable_trigger(&mut self, enabled: bool) -> Result<()>;

    /// Start or stop a software-initiated scan.
    async fn soft_scan_trigger(&mut self, active: bool) -> Result<()>;

    /// Write tag memory, addressing the tag by its current EPC.
    ///
    /// The returned [`WriteOutcome`] is the vendor response code; a
    /// non-success outcome is data, not an error — only transport
    /// failures surface as `Err`.
    async fn write_tag_epc(&mut self, request: &TagWriteRequest) -> Result<WriteOutcome>;
}

/// Barcode decoder service abstraction.
///
/// Same lifecycle shape as [`RfidReader`]: `open` binds, readiness
/// arrives as [`BarcodeNotification::ServiceConnected`], decodes stream
/// in on the subscription channel.
pub trait BarcodeReader: Send + Sync {
    /// Bind the barcode reader service.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor service rejects the binding.
    async fn open(&mut self) -> Result<()>;

    /// Release the service binding. Safe to call when not bound.
    async fn close(&mut self) -> Result<()>;

    /// Obtain a fresh notification channel, replacing any previous one.
    async fn subscribe(&mut self) -> mpsc::Receiver<BarcodeNotification>;

    /// Reset the decoder to factory defaults.
    async fn reset_to_default(&mut self) -> Result<()>;

    /// Apply output formatting.
    async fn set_output_config(&mut self, config: &BarcodeOutputConfig) -> Result<()>;

    /// Set the decode beep volume.
    async fn set_beep(&mut self, beep: BeepMode) -> Result<()>;

    /// Activate or deactivate the decoder.
    async fn set_active(&mut self, active: bool) -> Result<()>;
}
