//! Vendor SDK seam for the scanner bridge.
//!
//! This crate models the entry points of the handheld scanner's
//! proprietary SDK as trait interfaces, so the adapter in `scanbridge`
//! never links against the vendor service directly. Two subsystems are
//! exposed, matching the device's split service architecture:
//!
//! - [`RfidReader`] — the UHF RFID module: lifecycle, operating
//!   parameters (Gen2 air interface, work/power modes, RF link profile),
//!   inventory notifications, trigger control, and tag programming.
//! - [`BarcodeReader`] — the barcode decoder service: lifecycle, output
//!   formatting, beep control, and decode notifications.
//!
//! Both subsystems push their broadcasts through a subscription channel
//! obtained from [`RfidReader::subscribe`] / [`BarcodeReader::subscribe`].
//! Subscribing again replaces the previous channel, which closes the old
//! receiver; a consumer that drains the channel therefore stops cleanly
//! when a newer session supersedes it.
//!
//! # Dispatch
//!
//! The traits use native `async fn` (Edition 2024 RPITIT) and are not
//! object-safe. Use the enum wrappers in [`devices`] for concrete
//! dispatch, the same pattern as generic type parameters but storable in
//! struct fields.
//!
//! # Mock implementations
//!
//! [`mock`] provides in-memory readers paired with controller handles
//! for development and testing without the physical device: push any
//! notification, inject per-command vendor failures, and inspect the
//! applied configuration.

#![allow(async_fn_in_trait)]

pub mod devices;
pub mod error;
pub mod mock;
pub mod notification;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use devices::{AnyBarcodeReader, AnyRfidReader};
pub use error::{Result, SdkError};
pub use notification::{BarcodeNotification, DeviceEventKind, RfidNotification};
pub use traits::{BarcodeReader, RfidReader};
pub use types::{
    AutoEnterChar, AutoEnterMode, BarcodeOutputConfig, BeepMode, Gen2Config, Gen2InventoryState,
    Gen2Session, Gen2SelectFlag, KeyboardEmulation, MemoryBank, PowerMode, RfLinkProfile,
    RfidDeviceInfo, RfidMode, RfidNotificationConfig, TagRead, TagWriteRequest, WorkMode,
    WriteOutcome,
};
