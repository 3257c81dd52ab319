//! Topic catalog for a single cast device.
//!
//! Every topic has the shape `chromecast/<device>/<property>`, where
//! `<device>` is the device namespace that scopes one handler instance.
//! Published state lives directly under the device, commands live under
//! `command/`.
//!
//! # Example
//!
//! ```rust
//! use castmqtt::topic::{self, CommandTopic, Topic, Topics};
//!
//! let topics = Topics::new("kitchen");
//! assert_eq!(topics.get(Topic::VolumeLevel), "chromecast/kitchen/volume_level");
//! assert_eq!(
//!     topics.command(CommandTopic::PlayerState),
//!     "chromecast/kitchen/command/player_state",
//! );
//! assert!(topic::matches("kitchen", "chromecast/kitchen/anything"));
//! ```

use std::fmt;

/// Placeholder substituted by the device namespace in every template.
pub const PLACEHOLDER: &str = "%s";

/// Topics the handler publishes state on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
    FriendlyName,
    ConnectionStatus,
    CastType,
    CurrentApp,
    PlayerDuration,
    PlayerPosition,
    PlayerState,
    VolumeLevel,
    VolumeMuted,
    MediaTitle,
    MediaAlbumName,
    MediaArtist,
    MediaAlbumArtist,
    MediaTrack,
    MediaImages,
    MediaContentType,
    MediaContentUrl,
}

impl Topic {
    /// All publish topics, in catalog order.
    pub const ALL: [Self; 17] = [
        Self::FriendlyName,
        Self::ConnectionStatus,
        Self::CastType,
        Self::CurrentApp,
        Self::PlayerDuration,
        Self::PlayerPosition,
        Self::PlayerState,
        Self::VolumeLevel,
        Self::VolumeMuted,
        Self::MediaTitle,
        Self::MediaAlbumName,
        Self::MediaArtist,
        Self::MediaAlbumArtist,
        Self::MediaTrack,
        Self::MediaImages,
        Self::MediaContentType,
        Self::MediaContentUrl,
    ];

    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::FriendlyName => "chromecast/%s/friendly_name",
            Self::ConnectionStatus => "chromecast/%s/connection_status",
            Self::CastType => "chromecast/%s/cast_type",
            Self::CurrentApp => "chromecast/%s/current_app",
            Self::PlayerDuration => "chromecast/%s/player_duration",
            Self::PlayerPosition => "chromecast/%s/player_position",
            Self::PlayerState => "chromecast/%s/player_state",
            Self::VolumeLevel => "chromecast/%s/volume_level",
            Self::VolumeMuted => "chromecast/%s/volume_muted",
            Self::MediaTitle => "chromecast/%s/media/title",
            Self::MediaAlbumName => "chromecast/%s/media/album_name",
            Self::MediaArtist => "chromecast/%s/media/artist",
            Self::MediaAlbumArtist => "chromecast/%s/media/album_artist",
            Self::MediaTrack => "chromecast/%s/media/track",
            Self::MediaImages => "chromecast/%s/media/images",
            Self::MediaContentType => "chromecast/%s/media/content_type",
            Self::MediaContentUrl => "chromecast/%s/media/content_url",
        }
    }

    /// Substitutes `namespace` into the template.
    #[must_use]
    pub fn format(self, namespace: &str) -> String {
        self.template().replacen(PLACEHOLDER, namespace, 1)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// Topics the handler subscribes to for inbound commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandTopic {
    VolumeLevel,
    VolumeMuted,
    PlayerPosition,
    PlayerState,
}

impl CommandTopic {
    /// All command topics, in routing order.
    pub const ALL: [Self; 4] = [
        Self::VolumeMuted,
        Self::VolumeLevel,
        Self::PlayerPosition,
        Self::PlayerState,
    ];

    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::VolumeLevel => "chromecast/%s/command/volume_level",
            Self::VolumeMuted => "chromecast/%s/command/volume_muted",
            Self::PlayerPosition => "chromecast/%s/command/player_position",
            Self::PlayerState => "chromecast/%s/command/player_state",
        }
    }

    /// Substitutes `namespace` into the template.
    #[must_use]
    pub fn format(self, namespace: &str) -> String {
        self.template().replacen(PLACEHOLDER, namespace, 1)
    }
}

impl fmt::Display for CommandTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// Returns whether `topic` belongs to the device `namespace`.
///
/// The second `/`-separated segment must equal `namespace` exactly. Topics
/// with fewer than two segments never match.
#[must_use]
pub fn matches(namespace: &str, topic: &str) -> bool {
    topic.split('/').nth(1) == Some(namespace)
}

/// Fully formatted topics for one device namespace.
///
/// Built once per handler so that routing compares plain strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Topics {
    namespace: String,
    publish: Vec<String>,
    commands: Vec<String>,
}

impl Topics {
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            publish: Topic::ALL.iter().map(|t| t.format(namespace)).collect(),
            commands: CommandTopic::ALL
                .iter()
                .map(|t| t.format(namespace))
                .collect(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the formatted publish topic.
    #[must_use]
    pub fn get(&self, topic: Topic) -> &str {
        // `ALL` lists every variant in declaration order.
        &self.publish[topic as usize]
    }

    /// Returns the formatted command topic.
    #[must_use]
    pub fn command(&self, topic: CommandTopic) -> &str {
        let index = CommandTopic::ALL
            .iter()
            .position(|t| *t == topic)
            .unwrap_or_default();
        &self.commands[index]
    }

    /// Looks up which command `topic` addresses, by exact string equality.
    #[must_use]
    pub fn route(&self, topic: &str) -> Option<CommandTopic> {
        self.commands
            .iter()
            .position(|t| t == topic)
            .map(|index| CommandTopic::ALL[index])
    }

    /// Formatted command topics to subscribe to.
    pub fn subscriptions(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }
}
