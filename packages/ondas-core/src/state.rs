//! Library configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Ondas core library.
///
/// All fields have sensible defaults; shells only override them when a
/// platform needs different buffering.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Capacity of the event broadcast channel UI listeners subscribe to.
    pub event_channel_capacity: usize,

    /// Capacity of the channel the casting SDK boundary posts session
    /// notifications into.
    pub session_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_channel_capacity: 100,
            session_channel_capacity: 32,
        }
    }
}
