//! # Push Notifications
//!
//! A finished run can announce itself on a Pushetta channel. Callers hold a
//! `Box<dyn Notifier>` and never need to know whether notifications are
//! actually available:
//!
//! - **`PushettaNotifier`** posts to the Pushetta HTTP API. It is compiled in
//!   with the default `push` feature.
//! - **`NoopNotifier`** accepts every message and does nothing. It is used
//!   when the `push` feature is disabled or the `[notification]` section lacks
//!   an API key or channel name.

use log::warn;
use serde::Serialize;

use crate::config::NotificationConfig;
#[cfg(feature = "push")]
use crate::error::Error;
use crate::error::Result;

/// Something that can deliver a short text notification.
pub trait Notifier {
    /// Deliver `message`.
    fn notify(&self, message: &str) -> Result<()>;

    /// Whether messages actually leave the process.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// JSON body of a Pushetta push.
#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    body: &'a str,
    message_type: &'a str,
}

/// Posts messages to a Pushetta channel.
#[derive(Debug, Clone)]
pub struct PushettaNotifier {
    api_key: String,
    channel_name: String,
    endpoint: String,
}

impl PushettaNotifier {
    pub fn new(
        api_key: impl Into<String>,
        channel_name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            channel_name: channel_name.into(),
            endpoint: endpoint.into(),
        }
    }

    /// `{endpoint}{channel}/`, adding the slash after the endpoint if missing.
    pub fn push_url(&self) -> String {
        let separator = if self.endpoint.ends_with('/') { "" } else { "/" };
        format!("{}{}{}/", self.endpoint, separator, self.channel_name)
    }

    #[cfg_attr(not(feature = "push"), allow(dead_code))]
    fn payload(message: &str) -> serde_json::Result<String> {
        serde_json::to_string(&PushPayload {
            body: message,
            message_type: "text/plain",
        })
    }
}

#[cfg(feature = "push")]
impl Notifier for PushettaNotifier {
    fn notify(&self, message: &str) -> Result<()> {
        let url = self.push_url();
        let body = Self::payload(message).map_err(|e| Error::Notification {
            url: url.clone(),
            message: e.to_string(),
        })?;

        ureq::post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Token {}", self.api_key))
            .send_string(&body)
            .map_err(|e| Error::Notification {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Pick the notifier for a project's `[notification]` section.
///
/// Falls back to [`NoopNotifier`] with a warning when push support is not
/// compiled in or the section is incomplete.
pub fn notifier_for(config: &NotificationConfig) -> Box<dyn Notifier> {
    if !cfg!(feature = "push") {
        warn!("push notifications are not available in this build");
        return Box::new(NoopNotifier);
    }
    if config.api_key.is_empty() || config.channel_name.is_empty() {
        warn!("[notification] needs api_key and channel_name - notification disabled");
        return Box::new(NoopNotifier);
    }
    pushetta(config)
}

#[cfg(feature = "push")]
fn pushetta(config: &NotificationConfig) -> Box<dyn Notifier> {
    Box::new(PushettaNotifier::new(
        config.api_key.clone(),
        config.channel_name.clone(),
        config.endpoint.clone(),
    ))
}

#[cfg(not(feature = "push"))]
fn pushetta(_config: &NotificationConfig) -> Box<dyn Notifier> {
    Box::new(NoopNotifier)
}
