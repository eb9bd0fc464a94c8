use std::time::Duration;

use serde::Deserialize;

fn default_close_delay() -> u64 {
    200
}

fn default_notification_secs() -> f64 {
    5.0
}

#[derive(Clone, Debug, Deserialize)]
pub struct BehaviourConfig {
    /// How long a closed modal is kept around before it is removed, in milliseconds
    #[serde(default = "default_close_delay")]
    pub close_delay_ms: u64,
    /// How long a notification stays on screen, in seconds
    #[serde(default = "default_notification_secs")]
    pub notification_secs: f64,
    /// Close the import modal as soon as a playlist has been imported
    #[serde(default)]
    pub close_on_import: bool,
}

impl BehaviourConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    /// Notification lifetime expressed in ticks. Always at least one tick.
    pub fn notification_ticks(&self, tick_rate: f64) -> u32 {
        let ticks = (self.notification_secs * tick_rate).ceil();
        if ticks.is_finite() && ticks >= 1.0 {
            ticks as u32
        } else {
            1
        }
    }
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: default_close_delay(),
            notification_secs: default_notification_secs(),
            close_on_import: false,
        }
    }
}
