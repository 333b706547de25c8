//! Typed vendor parameters and data structures.
//!
//! The vendor SDK configures the reader through settings structs with
//! many loosely-typed fields. This module renders each of them as an
//! explicit value object with named fields and documented defaults, so
//! the configuration the adapter pushes on every reconnect is visible in
//! one place instead of scattered across call sites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// RFID operating modes
// ============================================================================

/// Reader work mode: which input subsystems participate in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WorkMode {
    /// Barcode and RFID both active.
    #[default]
    Comprehensive,

    /// RFID module only.
    RfidOnly,

    /// Barcode decoder only.
    BarcodeOnly,
}

/// RFID scan mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RfidMode {
    /// Trigger-keyed single scan.
    NormalScan,

    /// Continuous inventory reporting EPC only.
    InventoryEpc,

    /// Continuous inventory reporting EPC and TID.
    #[default]
    InventoryEpcTid,
}

/// Reader power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PowerMode {
    #[default]
    Normal,
    PowerSaving,
}

/// RF link profile: modulation scheme, encoding, and backscatter rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RfLinkProfile {
    /// DSB-ASK modulation, FM0 encoding, 40 kHz.
    DsbAskFm0At40Khz,

    /// PR-ASK modulation, Miller-4 encoding, 250 kHz.
    PrAskMiller4At250Khz,

    /// PR-ASK modulation, Miller-4 encoding, 300 kHz.
    #[default]
    PrAskMiller4At300Khz,
}

// ============================================================================
// Gen2 air interface
// ============================================================================

/// Gen2 session the reader inventories in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gen2Session {
    #[default]
    S0,
    S1,
    S2,
    S3,
}

/// Inventoried-flag state targeted during singulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gen2InventoryState {
    #[default]
    StateA,
    StateB,
}

/// SL flag filter applied during singulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gen2SelectFlag {
    /// Match tags regardless of SL state.
    #[default]
    All,
    Asserted,
    Deasserted,
}

/// Gen2 air-interface parameters pushed on every reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gen2Config {
    pub session: Gen2Session,
    pub inventory_state: Gen2InventoryState,
    pub select_flag: Gen2SelectFlag,
}

// ============================================================================
// Notification preferences
// ============================================================================

/// Reader beep volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BeepMode {
    Mute,
    Low,
    High,
}

/// RFID reader notification preferences.
///
/// Defaults mute the per-read beep (the host application provides its
/// own feedback) while keeping the battery and temperature alerts the
/// operator relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfidNotificationConfig {
    /// Per-read beep volume.
    pub reader_beep: BeepMode,

    /// Blink the LED on battery state changes.
    pub battery_led: bool,

    /// Beep on low battery.
    pub battery_beep: bool,

    /// Alert when the RF module overheats.
    pub over_temperature_alert: bool,
}

impl Default for RfidNotificationConfig {
    fn default() -> Self {
        Self {
            reader_beep: BeepMode::Mute,
            battery_led: true,
            battery_beep: true,
            over_temperature_alert: true,
        }
    }
}

// ============================================================================
// Barcode output formatting
// ============================================================================

/// How decoded barcodes are injected into the host system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyboardEmulation {
    /// Deliver through the reader service broadcast only.
    #[default]
    None,

    /// Type into the focused field via the input method.
    InputMethod,

    /// Synthesize raw key events.
    KeyEvents,
}

/// Automatic enter-key emission after a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AutoEnterMode {
    #[default]
    Disabled,
    BeforeData,
    AfterData,
}

/// Character emitted by [`AutoEnterMode`] when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AutoEnterChar {
    #[default]
    None,
    CarriageReturn,
    Tab,
    Space,
}

/// Barcode decoder output formatting.
///
/// Defaults strip every decoration the decoder can add — no keyboard
/// emulation, no auto-enter, no code length/type annotations, no
/// prefix/suffix — leaving the raw decoded string with a `:` delimiter
/// between multi-part reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeOutputConfig {
    pub keyboard_emulation: KeyboardEmulation,
    pub auto_enter: AutoEnterMode,
    pub auto_enter_char: AutoEnterChar,
    pub show_code_length: bool,
    pub show_code_type: bool,
    pub prefix: String,
    pub suffix: String,
    pub delimiter: char,
}

impl Default for BarcodeOutputConfig {
    fn default() -> Self {
        Self {
            keyboard_emulation: KeyboardEmulation::None,
            auto_enter: AutoEnterMode::Disabled,
            auto_enter_char: AutoEnterChar::None,
            show_code_length: false,
            show_code_type: false,
            prefix: String::new(),
            suffix: String::new(),
            delimiter: ':',
        }
    }
}

// ============================================================================
// Device data
// ============================================================================

/// RFID reader identity as reported by the vendor service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfidDeviceInfo {
    /// Marketing name of the reader.
    pub model: String,

    /// Reader serial number.
    pub serial_number: String,

    /// Optional firmware version string.
    pub firmware_version: Option<String>,
}

impl RfidDeviceInfo {
    /// Create device info with required fields.
    pub fn new(model: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            serial_number: serial_number.into(),
            firmware_version: None,
        }
    }

    /// Set the firmware version.
    pub fn with_firmware_version(mut self, firmware_version: impl Into<String>) -> Self {
        self.firmware_version = Some(firmware_version.into());
        self
    }
}

/// One inventory read delivered by the RFID module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRead {
    /// EPC identifier as reported by the reader (hex string).
    pub epc: String,

    /// TID, present in EPC+TID inventory mode.
    pub tid: Option<String>,

    /// Signal strength of the read in dBm.
    pub rssi: f64,

    /// When the read was delivered.
    pub timestamp: DateTime<Utc>,
}

impl TagRead {
    /// Create a tag read stamped with the current time.
    pub fn new(epc: impl Into<String>, rssi: f64) -> Self {
        Self {
            epc: epc.into(),
            tid: None,
            rssi,
            timestamp: Utc::now(),
        }
    }

    /// Attach the TID reported alongside the EPC.
    pub fn with_tid(mut self, tid: impl Into<String>) -> Self {
        self.tid = Some(tid.into());
        self
    }
}

/// Tag memory banks addressable by read/write commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryBank {
    Reserved,
    Epc,
    Tid,
    User,
}

/// Parameters of a direct tag write, addressed by the tag's current EPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWriteRequest {
    /// Access password presented to the tag.
    pub access_password: Vec<u8>,

    /// EPC currently held by the target tag.
    pub target_epc: Vec<u8>,

    /// Memory bank written.
    pub bank: MemoryBank,

    /// Word offset within the bank.
    pub word_offset: u32,

    /// Number of 16-bit words written.
    pub word_count: u32,

    /// Data written at the offset.
    pub data: Vec<u8>,
}

/// Vendor response code of a tag write.
///
/// The discriminants are the raw codes the vendor service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteOutcome {
    OperationSuccess,
    OperationFinish,
    TimeoutFail,
    PasswordFail,
    OperationFail,
    DeviceBusy,
}

impl WriteOutcome {
    /// Decode a raw vendor response code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::OperationSuccess),
            1 => Some(Self::OperationFinish),
            2 => Some(Self::TimeoutFail),
            6 => Some(Self::PasswordFail),
            7 => Some(Self::OperationFail),
            251 => Some(Self::DeviceBusy),
            _ => None,
        }
    }

    /// Raw vendor response code.
    pub fn code(&self) -> u8 {
        match self {
            Self::OperationSuccess => 0,
            Self::OperationFinish => 1,
            Self::TimeoutFail => 2,
            Self::PasswordFail => 6,
            Self::OperationFail => 7,
            Self::DeviceBusy => 251,
        }
    }

    /// Whether the write took effect.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::OperationSuccess)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OperationSuccess => "OperationSuccess",
            Self::OperationFinish => "OperationFinish",
            Self::TimeoutFail => "TimeoutFail",
            Self::PasswordFail => "PasswordFail",
            Self::OperationFail => "OperationFail",
            Self::DeviceBusy => "DeviceBusy",
        };
        write!(f, "{}", name)
    }
}
