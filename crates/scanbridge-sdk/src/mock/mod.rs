//! Mock vendor subsystem implementations for testing and development.
//!
//! Each mock comes paired with a controller handle: the reader side
//! implements the SDK trait and is handed to the bridge, the handle side
//! stays with the test to push notifications, inject vendor failures,
//! and inspect the configuration the bridge applied.

mod barcode;
mod rfid;

pub use barcode::{MockBarcodeHandle, MockBarcodeReader};
pub use rfid::{MockRfidHandle, MockRfidReader};
