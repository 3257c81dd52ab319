//! Consumer-facing contract for decoded control requests.
//!
//! Implement only the requests the device driver supports; every method
//! defaults to doing nothing.
//!
//! # Example
//!
//! ```rust
//! use castmqtt::callback::ChangesCallback;
//!
//! #[derive(Default)]
//! struct Volume {
//!     level: i64,
//! }
//!
//! impl ChangesCallback for Volume {
//!     fn on_volume_level_absolute_requested(&mut self, level: i64) {
//!         self.level = level.clamp(0, 100);
//!     }
//!
//!     fn on_volume_level_relative_requested(&mut self, offset: i64) {
//!         self.level = (self.level + offset).clamp(0, 100);
//!     }
//! }
//! ```

use crate::command::{Command, PlayerControl};

/// Receives control requests decoded from command topics.
///
/// At most one method is invoked per inbound message.
#[expect(clippy::module_name_repetitions)]
pub trait ChangesCallback {
    fn on_volume_mute_requested(&mut self, _is_muted: bool) {}

    fn on_volume_level_relative_requested(&mut self, _offset: i64) {}

    fn on_volume_level_absolute_requested(&mut self, _level: i64) {}

    /// Position in seconds from the start of the media.
    fn on_player_position_requested(&mut self, _position: i64) {}

    /// `content_type` is `None` when it was neither given nor guessable.
    fn on_player_play_stream_requested(&mut self, _content_url: &str, _content_type: Option<&str>) {
    }

    fn on_player_pause_requested(&mut self) {}

    fn on_player_resume_requested(&mut self) {}

    fn on_player_stop_requested(&mut self) {}

    fn on_player_skip_requested(&mut self) {}

    fn on_player_rewind_requested(&mut self) {}
}

impl<T> ChangesCallback for &mut T
where
    T: ChangesCallback + ?Sized,
{
    fn on_volume_mute_requested(&mut self, is_muted: bool) {
        (**self).on_volume_mute_requested(is_muted);
    }

    fn on_volume_level_relative_requested(&mut self, offset: i64) {
        (**self).on_volume_level_relative_requested(offset);
    }

    fn on_volume_level_absolute_requested(&mut self, level: i64) {
        (**self).on_volume_level_absolute_requested(level);
    }

    fn on_player_position_requested(&mut self, position: i64) {
        (**self).on_player_position_requested(position);
    }

    fn on_player_play_stream_requested(&mut self, content_url: &str, content_type: Option<&str>) {
        (**self).on_player_play_stream_requested(content_url, content_type);
    }

    fn on_player_pause_requested(&mut self) {
        (**self).on_player_pause_requested();
    }

    fn on_player_resume_requested(&mut self) {
        (**self).on_player_resume_requested();
    }

    fn on_player_stop_requested(&mut self) {
        (**self).on_player_stop_requested();
    }

    fn on_player_skip_requested(&mut self) {
        (**self).on_player_skip_requested();
    }

    fn on_player_rewind_requested(&mut self) {
        (**self).on_player_rewind_requested();
    }
}

impl Command {
    /// Invokes the callback method matching this command.
    pub fn dispatch<C>(&self, callback: &mut C)
    where
        C: ChangesCallback + ?Sized,
    {
        match self {
            Self::VolumeMuted(is_muted) => callback.on_volume_mute_requested(*is_muted),
            Self::VolumeAbsolute(level) => callback.on_volume_level_absolute_requested(*level),
            Self::VolumeRelative(offset) => callback.on_volume_level_relative_requested(*offset),
            Self::PlayerPosition(position) => callback.on_player_position_requested(*position),
            Self::Player(PlayerControl::Resume) => callback.on_player_resume_requested(),
            Self::Player(PlayerControl::Pause) => callback.on_player_pause_requested(),
            Self::Player(PlayerControl::Stop) => callback.on_player_stop_requested(),
            Self::Player(PlayerControl::Skip) => callback.on_player_skip_requested(),
            Self::Player(PlayerControl::Rewind) => callback.on_player_rewind_requested(),
            Self::PlayStream(stream) => callback.on_player_play_stream_requested(
                &stream.content_url,
                stream.content_type.as_deref(),
            ),
        }
    }
}
