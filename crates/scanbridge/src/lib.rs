//! Bridge between a host application and a vendor RFID/barcode scanner
//! SDK.
//!
//! The adapter translates the host's asynchronous call/event idiom into
//! the vendor SDK's callback/broadcast idiom and back:
//!
//! - **Commands in**: connect/disconnect lifecycle, status queries,
//!   antenna level, trigger enable, single-read toggle, dedup-cache
//!   clear, and tag programming — the [`ScannerBridge`] methods.
//! - **Events out**: reader status, trigger presses, tag reads, barcode
//!   decodes, and tag-write outcomes, normalized as [`ScannerEvent`]
//!   values on one `mpsc` channel.
//!
//! The two vendor subsystems (RFID module, barcode decoder) connect
//! independently and asynchronously. After each one announces itself,
//! the bridge pushes a fixed default configuration
//! ([`config::RfidDefaults`], [`config::BarcodeDefaults`]) so the reader
//! always runs the same parameters regardless of what a previous app
//! left behind.
//!
//! Tag reads pass through a gate before emission: in continuous
//! inventory, a dedup cache suppresses EPCs already seen since the last
//! [`ScannerBridge::clear`]; in single-read mode, the first read above a
//! fixed RSSI threshold stops the scan and is the only one emitted.
//!
//! See `scanbridge-sdk` for the vendor seam and its mock
//! implementations.

pub mod bridge;
pub mod config;
mod dispatch;
pub mod error;
pub mod events;

// Re-export commonly used types for convenience
pub use bridge::{DeviceDetails, ScannerBridge};
pub use config::{BarcodeDefaults, BridgeConfig, RfidDefaults};
pub use error::{BridgeError, Result};
pub use events::ScannerEvent;
