//! Device state snapshots, as fed to the grouped writes of
//! [`PropertyHandler`](crate::handler::PropertyHandler).
//!
//! Fields are optional because cast devices report partial state: an idle
//! receiver has no media, a backdrop app has no player. Absent fields
//! publish as empty strings.

use std::fmt;

/// Receiver-level state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CastStatus {
    pub app_name: Option<String>,
    /// Fraction between 0 and 1, published as a percentage.
    pub volume_level: Option<f64>,
    pub volume_muted: Option<bool>,
}

/// Media session playback state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerStatus {
    /// Device player state, such as `PLAYING`, `PAUSED`, `BUFFERING` or `IDLE`.
    pub state: Option<String>,
    /// Seconds.
    pub current_time: Option<f64>,
    /// Seconds.
    pub duration: Option<f64>,
}

/// Metadata of the media being played.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaStatus {
    pub title: Option<String>,
    pub album_name: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub track: Option<u32>,
    /// Cover art URLs.
    pub images: Option<Vec<String>>,
    pub content_type: Option<String>,
    pub content_url: Option<String>,
}

/// Static device description, published once per connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastData {
    /// Such as `cast`, `audio` or `group`.
    pub cast_type: Option<String>,
    pub friendly_name: Option<String>,
}

/// State of the connection between the bridge and the cast device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Lost,
    Failed,
}

impl ConnectionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "CONNECTING",
            Self::Connected => "CONNECTED",
            Self::Disconnected => "DISCONNECTED",
            Self::Lost => "LOST",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
