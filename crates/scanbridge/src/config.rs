//! Default operating configuration pushed on every reconnect.
//!
//! The bridge does not persist reader settings. Each time a subsystem
//! announces its service-connected notification, the dispatcher pushes
//! the full bundle below, so the reader always runs the same parameters
//! regardless of what a previous app left behind.
//!
//! Sub-steps run in a fixed order and the first failure aborts the rest
//! of the sequence; the caller surfaces the vendor diagnostic as a
//! reader-status event.

use scanbridge_sdk::{
    BarcodeOutputConfig, BarcodeReader, BeepMode, Gen2Config, PowerMode, RfLinkProfile, RfidMode,
    RfidNotificationConfig, RfidReader, WorkMode,
};

/// RFID parameter bundle applied after the RFID service connects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RfidDefaults {
    /// Beep/LED/alert preferences.
    pub notification: RfidNotificationConfig,

    /// Gen2 air-interface parameters.
    pub gen2: Gen2Config,

    /// Work mode; `Comprehensive` keeps barcode and RFID both live.
    pub work_mode: WorkMode,

    /// Scan mode; EPC+TID inventory.
    pub rfid_mode: RfidMode,

    /// Power mode.
    pub power_mode: PowerMode,

    /// RF link profile.
    pub rf_link: RfLinkProfile,
}

/// Barcode parameter bundle applied after the reader service connects.
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeDefaults {
    /// Output formatting; the default strips every decoration.
    pub output: BarcodeOutputConfig,

    /// Decode beep volume.
    pub beep: BeepMode,
}

impl Default for BarcodeDefaults {
    fn default() -> Self {
        Self {
            output: BarcodeOutputConfig::default(),
            beep: BeepMode::Mute,
        }
    }
}

/// Full bridge configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BridgeConfig {
    pub rfid: RfidDefaults,
    pub barcode: BarcodeDefaults,
}

/// Push the RFID bundle into the reader.
///
/// Order matters: the factory reset comes first so the remaining steps
/// start from a known state.
///
/// # Errors
///
/// Returns the first vendor failure; later sub-steps are not attempted.
pub async fn apply_rfid_defaults<R: RfidReader>(
    reader: &mut R,
    defaults: &RfidDefaults,
) -> scanbridge_sdk::Result<()> {
    reader.reset_to_default().await?;
    reader.set_notification(&defaults.notification).await?;
    reader.set_gen2(&defaults.gen2).await?;
    reader.set_work_mode(defaults.work_mode).await?;
    reader.set_rfid_mode(defaults.rfid_mode).await?;
    reader.set_power_mode(defaults.power_mode).await?;
    reader.set_rf_link(defaults.rf_link).await?;
    Ok(())
}

/// Push the barcode bundle into the decoder and activate it.
///
/// # Errors
///
/// Returns the first vendor failure; later sub-steps (including the
/// final activation) are not attempted.
pub async fn apply_barcode_defaults<B: BarcodeReader>(
    reader: &mut B,
    defaults: &BarcodeDefaults,
) -> scanbridge_sdk::Result<()> {
    reader.reset_to_default().await?;
    reader.set_output_config(&defaults.output).await?;
    reader.set_beep(defaults.beep).await?;
    reader.set_active(true).await?;
    Ok(())
}
