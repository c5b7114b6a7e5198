use serde::Deserialize;

/// Top-level configuration settings for the client.
///
/// Includes the backend address, the status poll cadence and the log level.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub poll: PollSettings,
    pub logging: LoggingSettings,
}

/// Where the automation controller's WebSocket endpoint lives.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub address: String,
}

/// Caller-side status polling.
///
/// `interval_secs = 0` disables the poller.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PollSettings {
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values are filled from defaults.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub connection: Option<PartialConnectionSettings>,
    pub poll: Option<PartialPollSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialConnectionSettings {
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialPollSettings {
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl PartialSettings {
    /// Overlays whatever was provided on top of `default`.
    pub fn merge(self, default: Settings) -> Settings {
        Settings {
            connection: ConnectionSettings {
                address: self
                    .connection
                    .and_then(|c| c.address)
                    .unwrap_or(default.connection.address),
            },
            poll: PollSettings {
                interval_secs: self
                    .poll
                    .and_then(|p| p.interval_secs)
                    .unwrap_or(default.poll.interval_secs),
            },
            logging: LoggingSettings {
                level: self
                    .logging
                    .and_then(|l| l.level)
                    .unwrap_or(default.logging.level),
            },
        }
    }
}

/// Provides default values for `Settings`.
///
/// The controller serves its socket on port 1880 under `/ws`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings {
                address: "ws://127.0.0.1:1880/ws".to_string(),
            },
            poll: PollSettings { interval_secs: 10 },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
