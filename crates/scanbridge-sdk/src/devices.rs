//! Enum wrappers for vendor subsystem dispatch.
//!
//! Native `async fn` in traits (RPITIT, Edition 2024) is not object-safe,
//! so `Box<dyn RfidReader>` is not available. These enums provide
//! concrete type dispatch at compile time instead: zero-cost, type-safe,
//! and extensible with feature-gated variants.

use crate::error::Result;
use crate::mock::{MockBarcodeReader, MockRfidReader};
use crate::notification::{BarcodeNotification, RfidNotification};
use crate::traits::{BarcodeReader, RfidReader};
use crate::types::{
    BarcodeOutputConfig, BeepMode, Gen2Config, PowerMode, RfLinkProfile, RfidDeviceInfo, RfidMode,
    RfidNotificationConfig, TagWriteRequest, WorkMode, WriteOutcome,
};
use tokio::sync::mpsc;

/// Enum wrapper for RFID module dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyRfidReader {
    /// In-memory reader for development and testing.
    Mock(MockRfidReader),
    // TODO: Service(ServiceRfidReader) once the AIDL binding to the
    // vendor RFID service is wired up
}

impl RfidReader for AnyRfidReader {
    async fn open(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.open().await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.close().await,
        }
    }

    async fn connection_status(&self) -> bool {
        match self {
            Self::Mock(reader) => reader.connection_status().await,
        }
    }

    async fn subscribe(&mut self) -> mpsc::Receiver<RfidNotification> {
        match self {
            Self::Mock(reader) => reader.subscribe().await,
        }
    }

    async fn reset_to_default(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.reset_to_default().await,
        }
    }

    async fn set_notification(&mut self, config: &RfidNotificationConfig) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_notification(config).await,
        }
    }

    async fn set_gen2(&mut self, config: &Gen2Config) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_gen2(config).await,
        }
    }

    async fn set_work_mode(&mut self, mode: WorkMode) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_work_mode(mode).await,
        }
    }

    async fn set_rfid_mode(&mut self, mode: RfidMode) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_rfid_mode(mode).await,
        }
    }

    async fn set_power_mode(&mut self, mode: PowerMode) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_power_mode(mode).await,
        }
    }

    async fn set_rf_link(&mut self, profile: RfLinkProfile) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_rf_link(profile).await,
        }
    }

    async fn device_info(&self) -> Result<RfidDeviceInfo> {
        match self {
            Self::Mock(reader) => reader.device_info().await,
        }
    }

    async fn battery_percent(&self) -> Result<u8> {
        match self {
            Self::Mock(reader) => reader.battery_percent().await,
        }
    }

    async fn tx_power(&self) -> Result<i32> {
        match self {
            Self::Mock(reader) => reader.tx_power().await,
        }
    }

    async fn set_tx_power(&mut self, level: i32) -> Result<i32> {
        match self {
            Self::Mock(reader) => reader.set_tx_power(level).await,
        }
    }

    async fn enable_trigger(&mut self, enabled: bool) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.enable_trigger(enabled).await,
        }
    }

    async fn soft_scan_trigger(&mut self, active: bool) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.soft_scan_trigger(active).await,
        }
    }

    async fn write_tag_epc(&mut self, request: &TagWriteRequest) -> Result<WriteOutcome> {
        match self {
            Self::Mock(reader) => reader.write_tag_epc(request).await,
        }
    }
}

/// Enum wrapper for barcode decoder dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyBarcodeReader {
    /// In-memory decoder for development and testing.
    Mock(MockBarcodeReader),
    // TODO: Service(ServiceBarcodeReader) once the vendor reader service
    // binding is wired up
}

impl BarcodeReader for AnyBarcodeReader {
    async fn open(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.open().await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.close().await,
        }
    }

    async fn subscribe(&mut self) -> mpsc::Receiver<BarcodeNotification> {
        match self {
            Self::Mock(reader) => reader.subscribe().await,
        }
    }

    async fn reset_to_default(&mut self) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.reset_to_default().await,
        }
    }

    async fn set_output_config(&mut self, config: &BarcodeOutputConfig) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_output_config(config).await,
        }
    }

    async fn set_beep(&mut self, beep: BeepMode) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_beep(beep).await,
        }
    }

    async fn set_active(&mut self, active: bool) -> Result<()> {
        match self {
            Self::Mock(reader) => reader.set_active(active).await,
        }
    }
}
