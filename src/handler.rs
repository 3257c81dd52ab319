//! Bridge between one cast device and its broker topics.
//!
//! The [`PropertyHandler`] owns the transport-facing [`Publisher`] and the
//! device-facing [`ChangesCallback`]:
//!
//! * outbound, device state is normalized into canonical text (see
//!   [`value`](crate::value)) and published, skipping values that did not
//!   change since the last successful publish;
//! * inbound, payloads on the command topics are decoded (see
//!   [`command`](crate::command)) and handed to the callback.
//!
//! Neither direction ever returns an error: malformed payloads, conversion
//! failures and publish failures are logged and dropped.
//!
//! All entry points take `&mut self`. Hosts that deliver messages from
//! several threads must put the handler behind a mutex.
//!
//! # Example
//!
//! ```rust
//! use castmqtt::{callback::ChangesCallback, handler::PropertyHandler, topic::Topic};
//!
//! #[derive(Default)]
//! struct Driver {
//!     muted: Option<bool>,
//! }
//!
//! impl ChangesCallback for Driver {
//!     fn on_volume_mute_requested(&mut self, is_muted: bool) {
//!         self.muted = Some(is_muted);
//!     }
//! }
//!
//! let mut sent = Vec::new();
//! let publisher = |topic: &str, payload: &str| -> castmqtt::error::Result<()> {
//!     sent.push(format!("{topic} {payload}"));
//!     Ok(())
//! };
//!
//! let mut handler = PropertyHandler::new("kitchen", publisher, Driver::default());
//! handler.write(Topic::VolumeLevel, 0.5);
//! handler.write(Topic::VolumeLevel, 0.5);
//! handler.handle("chromecast/kitchen/command/volume_muted", b"1");
//!
//! assert_eq!(handler.callback().muted, Some(true));
//! drop(handler);
//! assert_eq!(sent, ["chromecast/kitchen/volume_level 50"]);
//! ```

use crate::{
    cache::WriteCache,
    callback::ChangesCallback,
    command::Command,
    config::Config,
    error::Result,
    status::{CastData, CastStatus, ConnectionStatus, MediaStatus, PlayerStatus},
    topic::{self, Topic, Topics},
    value::Value,
};

/// Sends a message to the broker.
///
/// Implemented for closures, so a transport client can be plugged in with
/// `|topic, payload| client.publish(topic, payload)`.
pub trait Publisher {
    /// # Errors
    ///
    /// Returns an error when the message could not be handed to the
    /// transport. The value is then published again on the next write.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<()>;
}

impl<F> Publisher for F
where
    F: FnMut(&str, &str) -> Result<()>,
{
    fn publish(&mut self, topic: &str, payload: &str) -> Result<()> {
        self(topic, payload)
    }
}

/// Publishes device state and routes commands for one device namespace.
pub struct PropertyHandler<P, C> {
    topics: Topics,
    publisher: P,
    callback: C,
    cache: WriteCache,
}

impl<P, C> PropertyHandler<P, C>
where
    P: Publisher,
    C: ChangesCallback,
{
    /// Creates a handler for the device `namespace`.
    ///
    /// The namespace is used as is; see [`Config::new`] for validation.
    pub fn new(namespace: &str, publisher: P, callback: C) -> Self {
        let topics = Topics::new(namespace);
        debug!("handling topics for {namespace}");

        Self {
            topics,
            publisher,
            callback,
            cache: WriteCache::new(),
        }
    }

    pub fn with_config(config: &Config, publisher: P, callback: C) -> Self {
        Self::new(&config.device_name, publisher, callback)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        self.topics.namespace()
    }

    #[must_use]
    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Command topics the transport should subscribe to.
    pub fn subscriptions(&self) -> impl Iterator<Item = &str> {
        self.topics.subscriptions()
    }

    /// Returns whether `topic` belongs to this device, e.g.
    /// `chromecast/<namespace>/player_state`.
    #[must_use]
    pub fn matches(&self, topic: &str) -> bool {
        topic::matches(self.namespace(), topic)
    }

    #[must_use]
    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Last value published on `topic`, if any.
    #[must_use]
    pub fn published(&self, topic: Topic) -> Option<&str> {
        self.cache.get(self.topics.get(topic))
    }

    #[must_use]
    pub fn into_parts(self) -> (P, C) {
        (self.publisher, self.callback)
    }

    /// Publishes `value` on `topic` unless it was the last value published.
    pub fn write(&mut self, topic: Topic, value: impl Into<Value>) {
        let value = value.into();
        let topic = self.topics.get(topic);

        let canonical = match value.to_canonical() {
            Ok(canonical) => canonical,
            Err(e) => {
                error!("value conversion error for {topic} ({value}): {e}");
                return;
            }
        };

        // Suppress writing the same value again until it has changed.
        if self.cache.is_current(topic, &canonical) {
            trace!("{topic} unchanged: {canonical:?}");
            return;
        }

        let previous = self.cache.update(topic, &canonical);
        debug!("publishing {topic}: {canonical:?}");
        if let Err(e) = self.publisher.publish(topic, &canonical) {
            error!("error publishing {topic}: {e}");
            self.cache.restore(topic, previous);
        }
    }

    pub fn write_cast_status(&mut self, status: &CastStatus) {
        self.write(Topic::CurrentApp, status.app_name.clone());
        self.write(Topic::VolumeLevel, status.volume_level);
        self.write(Topic::VolumeMuted, status.volume_muted);
    }

    pub fn write_player_status(&mut self, status: &PlayerStatus) {
        self.write(Topic::PlayerState, status.state.clone());
        self.write(Topic::PlayerPosition, status.current_time);
        self.write(Topic::PlayerDuration, status.duration);
    }

    pub fn write_media_status(&mut self, status: &MediaStatus) {
        self.write(Topic::MediaTitle, status.title.clone());
        self.write(Topic::MediaAlbumName, status.album_name.clone());
        self.write(Topic::MediaArtist, status.artist.clone());
        self.write(Topic::MediaAlbumArtist, status.album_artist.clone());
        self.write(Topic::MediaTrack, status.track);
        self.write(Topic::MediaImages, status.images.clone());
        self.write(Topic::MediaContentType, status.content_type.clone());
        self.write(Topic::MediaContentUrl, status.content_url.clone());
    }

    pub fn write_connection_status(&mut self, status: ConnectionStatus) {
        self.write(Topic::ConnectionStatus, status.as_str());
    }

    pub fn write_cast_data(&mut self, data: &CastData) {
        self.write(Topic::CastType, data.cast_type.clone());
        self.write(Topic::FriendlyName, data.friendly_name.clone());
    }

    /// Decodes a message received on `topic` and invokes the callback.
    ///
    /// Messages for other devices, for topics other than the command topics,
    /// and with payloads that are ignored or malformed invoke nothing.
    pub fn handle(&mut self, topic: &str, payload: impl AsRef<[u8]>) {
        if !self.matches(topic) {
            trace!("ignoring message for other device on {topic}");
            return;
        }

        let Some(command_topic) = self.topics.route(topic) else {
            trace!("ignoring message on {topic}");
            return;
        };

        let payload = match std::str::from_utf8(payload.as_ref()) {
            Ok(payload) => payload.trim(),
            Err(e) => {
                error!("failed decoding payload on {topic}: {e}");
                return;
            }
        };

        match Command::parse(command_topic, payload) {
            Ok(Some(command)) => {
                debug!("{topic}: {command}");
                command.dispatch(&mut self.callback);
            }
            Ok(None) => trace!("ignoring payload on {topic}: {payload:?}"),
            Err(e) => error!("failed decoding requested {command_topic} data {payload:?}: {e}"),
        }
    }
}
