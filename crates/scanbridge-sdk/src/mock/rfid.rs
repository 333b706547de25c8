//! Mock RFID module implementation.

use crate::error::{Result, SdkError};
use crate::notification::RfidNotification;
use crate::traits::RfidReader;
use crate::types::{
    Gen2Config, PowerMode, RfLinkProfile, RfidDeviceInfo, RfidMode, RfidNotificationConfig,
    TagRead, TagWriteRequest, WorkMode, WriteOutcome,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify, mpsc};

const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
struct RfidState {
    open: bool,
    subscriber: Option<mpsc::Sender<RfidNotification>>,
    failures: HashMap<&'static str, String>,
    command_log: Vec<&'static str>,
    info: RfidDeviceInfo,
    battery_percent: u8,
    tx_power: i32,
    trigger_enabled: Option<bool>,
    soft_scan_active: bool,
    write_outcome: WriteOutcome,
    writes: Vec<TagWriteRequest>,
    notification_config: Option<RfidNotificationConfig>,
    gen2: Option<Gen2Config>,
    work_mode: Option<WorkMode>,
    rfid_mode: Option<RfidMode>,
    power_mode: Option<PowerMode>,
    rf_link: Option<RfLinkProfile>,
}

impl RfidState {
    /// Log the command and fail it if a failure was injected for it.
    fn invoke(&mut self, command: &'static str) -> Result<()> {
        self.command_log.push(command);
        match self.failures.remove(command) {
            Some(message) => Err(SdkError::command_failed(command, message)),
            None => Ok(()),
        }
    }
}

/// Mock RFID module for testing and development.
///
/// Simulates the vendor RFID service in memory. Created together with a
/// [`MockRfidHandle`] that drives it:
///
/// ```
/// use scanbridge_sdk::mock::MockRfidReader;
/// use scanbridge_sdk::traits::RfidReader;
///
/// #[tokio::main]
/// async fn main() -> scanbridge_sdk::Result<()> {
///     let (mut reader, handle) = MockRfidReader::new();
///
///     reader.open().await?;
///     let mut notifications = reader.subscribe().await;
///
///     handle.tag_read("E200001122334455", -35.0).await?;
///
///     let first = notifications.recv().await;
///     assert!(first.is_some());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockRfidReader {
    inner: Arc<Mutex<RfidState>>,
    subscribed: Arc<Notify>,
}

impl MockRfidReader {
    /// Create a mock reader and its controller handle.
    pub fn new() -> (Self, MockRfidHandle) {
        let inner = Arc::new(Mutex::new(RfidState {
            open: false,
            subscriber: None,
            failures: HashMap::new(),
            command_log: Vec::new(),
            info: RfidDeviceInfo::new("Mock UHF Reader", "MOCK-0001"),
            battery_percent: 100,
            tx_power: 27,
            trigger_enabled: None,
            soft_scan_active: false,
            write_outcome: WriteOutcome::OperationSuccess,
            writes: Vec::new(),
            notification_config: None,
            gen2: None,
            work_mode: None,
            rfid_mode: None,
            power_mode: None,
            rf_link: None,
        }));
        let subscribed = Arc::new(Notify::new());

        let handle = MockRfidHandle {
            inner: Arc::clone(&inner),
            subscribed: Arc::clone(&subscribed),
        };

        (Self { inner, subscribed }, handle)
    }
}

impl RfidReader for MockRfidReader {
    async fn open(&mut self) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("open")?;
        state.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.inner.lock().await;
        let result = state.invoke("close");
        state.open = false;
        state.subscriber = None;
        result
    }

    async fn connection_status(&self) -> bool {
        self.inner.lock().await.open
    }

    async fn subscribe(&mut self) -> mpsc::Receiver<RfidNotification> {
        let (tx, rx) = mpsc::channel(NOTIFICATION_CHANNEL_CAPACITY);
        {
            let mut state = self.inner.lock().await;
            state.command_log.push("subscribe");
            state.subscriber = Some(tx);
        }
        self.subscribed.notify_waiters();
        rx
    }

    async fn reset_to_default(&mut self) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("reset_to_default")?;
        state.notification_config = None;
        state.gen2 = None;
        state.work_mode = None;
        state.rfid_mode = None;
        state.power_mode = None;
        state.rf_link = None;
        Ok(())
    }

    async fn set_notification(&mut self, config: &RfidNotificationConfig) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_notification")?;
        state.notification_config = Some(*config);
        Ok(())
    }

    async fn set_gen2(&mut self, config: &Gen2Config) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_gen2")?;
        state.gen2 = Some(*config);
        Ok(())
    }

    async fn set_work_mode(&mut self, mode: WorkMode) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_work_mode")?;
        state.work_mode = Some(mode);
        Ok(())
    }

    async fn set_rfid_mode(&mut self, mode: RfidMode) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_rfid_mode")?;
        state.rfid_mode = Some(mode);
        Ok(())
    }

    async fn set_power_mode(&mut self, mode: PowerMode) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_power_mode")?;
        state.power_mode = Some(mode);
        Ok(())
    }

    async fn set_rf_link(&mut self, profile: RfLinkProfile) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_rf_link")?;
        state.rf_link = Some(profile);
        Ok(())
    }

    async fn device_info(&self) -> Result<RfidDeviceInfo> {
        let mut state = self.inner.lock().await;
        state.invoke("device_info")?;
        Ok(state.info.clone())
    }

    async fn battery_percent(&self) -> Result<u8> {
        let mut state = self.inner.lock().await;
        state.invoke("battery_percent")?;
        Ok(state.battery_percent)
    }

    async fn tx_power(&self) -> Result<i32> {
        let mut state = self.inner.lock().await;
        state.invoke("tx_power")?;
        Ok(state.tx_power)
    }

    async fn set_tx_power(&mut self, level: i32) -> Result<i32> {
        let mut state = self.inner.lock().await;
        state.invoke("set_tx_power")?;
        state.tx_power = level;
        Ok(level)
    }

    async fn enable_trigger(&mut self, enabled: bool) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("enable_trigger")?;
        state.trigger_enabled = Some(enabled);
        Ok(())
    }

    async fn soft_scan_trigger(&mut self, active: bool) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("soft_scan_trigger")?;
        state.soft_scan_active = active;
        Ok(())
    }

    async fn write_tag_epc(&mut self, request: &TagWriteRequest) -> Result<WriteOutcome> {
        let mut state = self.inner.lock().await;
        state.invoke("write_tag_epc")?;
        state.writes.push(request.clone());
        Ok(state.write_outcome)
    }
}

/// Controller handle for a [`MockRfidReader`].
///
/// Pushes notifications the way the vendor service broadcasts them, and
/// exposes the reader's internal state for assertions.
#[derive(Debug, Clone)]
pub struct MockRfidHandle {
    inner: Arc<Mutex<RfidState>>,
    subscribed: Arc<Notify>,
}

impl MockRfidHandle {
    /// Deliver a notification to the current subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ChannelClosed`] when nothing is subscribed.
    pub async fn notify(&self, notification: RfidNotification) -> Result<()> {
        let sender = self.inner.lock().await.subscriber.clone();
        let sender = sender.ok_or(SdkError::ChannelClosed)?;
        sender
            .send(notification)
            .await
            .map_err(|_| SdkError::ChannelClosed)
    }

    /// Announce that the RFID service finished binding.
    pub async fn service_connected(&self) -> Result<()> {
        self.notify(RfidNotification::ServiceConnected).await
    }

    /// Deliver one inventory read.
    pub async fn tag_read(&self, epc: &str, rssi: f64) -> Result<()> {
        self.notify(RfidNotification::TagData(TagRead::new(epc, rssi)))
            .await
    }

    /// Deliver a trigger button press or release.
    pub async fn trigger_key(&self, pressed: bool) -> Result<()> {
        self.notify(RfidNotification::TriggerKey { pressed }).await
    }

    /// Announce that the reader grip was attached.
    pub async fn device_attached(&self) -> Result<()> {
        self.notify(RfidNotification::DeviceAttached).await
    }

    /// Announce that the reader grip was detached.
    pub async fn device_detached(&self) -> Result<()> {
        self.notify(RfidNotification::DeviceDetached).await
    }

    /// Block until something holds a live subscription.
    ///
    /// Makes open-then-notify test sequences deterministic: the bridge
    /// registers its subscription from a background task, and this waits
    /// out that race.
    pub async fn wait_until_subscribed(&self) {
        loop {
            let notified = self.subscribed.notified();
            if self.inner.lock().await.subscriber.is_some() {
                return;
            }
            notified.await;
        }
    }

    /// Make the next invocation of `command` fail with the given vendor
    /// error string.
    pub async fn fail_command(&self, command: &'static str, message: &str) {
        self.inner
            .lock()
            .await
            .failures
            .insert(command, message.to_string());
    }

    /// Set the reported battery charge.
    pub async fn set_battery_percent(&self, percent: u8) {
        self.inner.lock().await.battery_percent = percent;
    }

    /// Set the reported device identity.
    pub async fn set_device_info(&self, info: RfidDeviceInfo) {
        self.inner.lock().await.info = info;
    }

    /// Script the outcome of subsequent tag writes.
    pub async fn set_write_outcome(&self, outcome: WriteOutcome) {
        self.inner.lock().await.write_outcome = outcome;
    }

    /// Commands invoked so far, in order.
    pub async fn command_log(&self) -> Vec<&'static str> {
        self.inner.lock().await.command_log.clone()
    }

    /// Whether the service binding is open.
    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.open
    }

    /// Gen2 parameters last applied, if any.
    pub async fn gen2(&self) -> Option<Gen2Config> {
        self.inner.lock().await.gen2
    }

    /// Work mode last applied, if any.
    pub async fn work_mode(&self) -> Option<WorkMode> {
        self.inner.lock().await.work_mode
    }

    /// RFID scan mode last applied, if any.
    pub async fn rfid_mode(&self) -> Option<RfidMode> {
        self.inner.lock().await.rfid_mode
    }

    /// Power mode last applied, if any.
    pub async fn power_mode(&self) -> Option<PowerMode> {
        self.inner.lock().await.power_mode
    }

    /// RF link profile last applied, if any.
    pub async fn rf_link(&self) -> Option<RfLinkProfile> {
        self.inner.lock().await.rf_link
    }

    /// Notification preferences last applied, if any.
    pub async fn notification_config(&self) -> Option<RfidNotificationConfig> {
        self.inner.lock().await.notification_config
    }

    /// Whether a soft scan is currently active.
    pub async fn soft_scan_active(&self) -> bool {
        self.inner.lock().await.soft_scan_active
    }

    /// Trigger button state last applied, if any.
    pub async fn trigger_enabled(&self) -> Option<bool> {
        self.inner.lock().await.trigger_enabled
    }

    /// Tag writes performed so far.
    pub async fn writes(&self) -> Vec<TagWriteRequest> {
        self.inner.lock().await.writes.clone()
    }

    /// Current antenna transmit power level.
    pub async fn tx_power_level(&self) -> i32 {
        self.inner.lock().await.tx_power
    }
}
