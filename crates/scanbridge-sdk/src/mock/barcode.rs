//! Mock barcode decoder implementation.

use crate::error::{Result, SdkError};
use crate::notification::BarcodeNotification;
use crate::traits::BarcodeReader;
use crate::types::{BarcodeOutputConfig, BeepMode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify, mpsc};

const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
struct BarcodeState {
    open: bool,
    subscriber: Option<mpsc::Sender<BarcodeNotification>>,
    failures: HashMap<&'static str, String>,
    command_log: Vec<&'static str>,
    output_config: Option<BarcodeOutputConfig>,
    beep: Option<BeepMode>,
    active: bool,
}

impl BarcodeState {
    fn invoke(&mut self, command: &'static str) -> Result<()> {
        self.command_log.push(command);
        match self.failures.remove(command) {
            Some(message) => Err(SdkError::command_failed(command, message)),
            None => Ok(()),
        }
    }
}

/// Mock barcode decoder for testing and development.
///
/// Simulates the vendor barcode reader service in memory. Created
/// together with a [`MockBarcodeHandle`] that drives it.
#[derive(Debug)]
pub struct MockBarcodeReader {
    inner: Arc<Mutex<BarcodeState>>,
    subscribed: Arc<Notify>,
}

impl MockBarcodeReader {
    /// Create a mock decoder and its controller handle.
    pub fn new() -> (Self, MockBarcodeHandle) {
        let inner = Arc::new(Mutex::new(BarcodeState {
            open: false,
            subscriber: None,
            failures: HashMap::new(),
            command_log: Vec::new(),
            output_config: None,
            beep: None,
            active: false,
        }));
        let subscribed = Arc::new(Notify::new());

        let handle = MockBarcodeHandle {
            inner: Arc::clone(&inner),
            subscribed: Arc::clone(&subscribed),
        };

        (Self { inner, subscribed }, handle)
    }
}

impl BarcodeReader for MockBarcodeReader {
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
        state.active = false;
        result
    }

    async fn subscribe(&mut self) -> mpsc::Receiver<BarcodeNotification> {
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
        state.output_config = None;
        state.beep = None;
        state.active = false;
        Ok(())
    }

    async fn set_output_config(&mut self, config: &BarcodeOutputConfig) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_output_config")?;
        state.output_config = Some(config.clone());
        Ok(())
    }

    async fn set_beep(&mut self, beep: BeepMode) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_beep")?;
        state.beep = Some(beep);
        Ok(())
    }

    async fn set_active(&mut self, active: bool) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.invoke("set_active")?;
        state.active = active;
        Ok(())
    }
}

/// Controller handle for a [`MockBarcodeReader`].
#[derive(Debug, Clone)]
pub struct MockBarcodeHandle {
    inner: Arc<Mutex<BarcodeState>>,
    subscribed: Arc<Notify>,
}

impl MockBarcodeHandle {
    /// Deliver a notification to the current subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::ChannelClosed`] when nothing is subscribed.
    pub async fn notify(&self, notification: BarcodeNotification) -> Result<()> {
        let sender = self.inner.lock().await.subscriber.clone();
        let sender = sender.ok_or(SdkError::ChannelClosed)?;
        sender
            .send(notification)
            .await
            .map_err(|_| SdkError::ChannelClosed)
    }

    /// Announce that the reader service finished binding.
    pub async fn service_connected(&self) -> Result<()> {
        self.notify(BarcodeNotification::ServiceConnected).await
    }

    /// Deliver a decoded barcode.
    pub async fn decoded(&self, data: &str) -> Result<()> {
        self.notify(BarcodeNotification::Decoded(data.to_string()))
            .await
    }

    /// Block until something holds a live subscription.
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

    /// Commands invoked so far, in order.
    pub async fn command_log(&self) -> Vec<&'static str> {
        self.inner.lock().await.command_log.clone()
    }

    /// Whether the service binding is open.
    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.open
    }

    /// Whether the decoder has been activated.
    pub async fn is_active(&self) -> bool {
        self.inner.lock().await.active
    }

    /// Output formatting last applied, if any.
    pub async fn output_config(&self) -> Option<BarcodeOutputConfig> {
        self.inner.lock().await.output_config.clone()
    }

    /// Beep volume last applied, if any.
    pub async fn beep(&self) -> Option<BeepMode> {
        self.inner.lock().await.beep
    }
}
