//! Vendor broadcast taxonomy.
//!
//! The vendor service announces everything — lifecycle, hardware events,
//! inventory data — through broadcasts identified by intent string. This
//! module renders that flat namespace as two enums, one per subsystem,
//! so consumers demultiplex with a `match` instead of string compares.

use crate::types::TagRead;
use std::fmt;

/// Broadcasts delivered by the RFID subsystem.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RfidNotification {
    /// The RFID service finished binding and is ready to accept
    /// configuration. Arrives asynchronously after `open()`.
    ServiceConnected,

    /// One inventory read.
    TagData(TagRead),

    /// The physical trigger button changed state.
    TriggerKey { pressed: bool },

    /// The reader grip/gun was attached to the terminal.
    DeviceAttached,

    /// The reader grip/gun was detached from the terminal.
    DeviceDetached,

    /// External power or cradle status changed. Informational.
    PowerStatus { external_power: bool, cradled: bool },

    /// Hardware condition report. Informational.
    DeviceEvent(DeviceEventKind),
}

/// Hardware conditions reported through [`RfidNotification::DeviceEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeviceEventKind {
    PowerSavingMode,
    LowBattery,
    ScannerFailure,
    BatteryLost,
    OverTemperature,
    BatteryReplugged,
}

impl fmt::Display for DeviceEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PowerSavingMode => "power saving mode",
            Self::LowBattery => "low battery",
            Self::ScannerFailure => "scanner failure",
            Self::BatteryLost => "battery lost",
            Self::OverTemperature => "over temperature",
            Self::BatteryReplugged => "battery re-plugged",
        };
        write!(f, "{}", name)
    }
}

/// Broadcasts delivered by the barcode subsystem.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BarcodeNotification {
    /// The barcode reader service finished binding and is ready to
    /// accept configuration. Arrives asynchronously after `open()`.
    ServiceConnected,

    /// A barcode was decoded (trigger press or soft trigger).
    Decoded(String),
}
