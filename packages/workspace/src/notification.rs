use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Error,
}

/// User-facing outcome of a boundary call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Generation counter for in-flight requests
///
/// Only the response to the most recently issued ticket is current.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn issue(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }
}
