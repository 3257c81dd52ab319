//! Inbound commands and their payload grammars.
//!
//! Each command topic has its own grammar:
//!
//! * `command/volume_muted`: `1` mutes, `0` unmutes, anything else is ignored.
//! * `command/volume_level`: a number, absolute (`55`) or relative when
//!   signed (`+5`, `-10`). Fractions are truncated toward zero.
//! * `command/player_position`: a number of seconds, truncated likewise.
//! * `command/player_state`: one of `RESUME`, `PAUSE`, `STOP`, `SKIP` or
//!   `REWIND`, or else a request to play a stream, given as
//!   - a JSON object: `{"content_url": "http://x/a.mp3", "content_type": "audio/mpeg"}`
//!   - a JSON array: `["http://x/a.mp3", "audio/mpeg"]`
//!   - a bare URL: `http://x/a.mp3`, its content type guessed from the
//!     file extension.
//!
//! Parsers return `Ok(None)` for payloads that are ignored by design, such as
//! empty payloads, and an error for payloads that are malformed.
//!
//! # Example
//!
//! ```rust
//! use castmqtt::command::{Command, PlayStream};
//! use castmqtt::topic::CommandTopic;
//!
//! let command = Command::parse(CommandTopic::VolumeLevel, "-10.9").unwrap();
//! assert_eq!(command, Some(Command::VolumeRelative(-10)));
//!
//! let command = Command::parse(CommandTopic::PlayerState, "http://x/song.mp3").unwrap();
//! assert_eq!(
//!     command,
//!     Some(Command::PlayStream(PlayStream::new(
//!         "http://x/song.mp3",
//!         Some("audio/mpeg".to_owned()),
//!     ))),
//! );
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{Error, Result},
    topic::CommandTopic,
};

/// A decoded control request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    VolumeMuted(bool),
    VolumeAbsolute(i64),
    VolumeRelative(i64),
    PlayerPosition(i64),
    Player(PlayerControl),
    PlayStream(PlayStream),
}

impl Command {
    /// Decodes a trimmed `payload` received on `topic`.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is malformed for the grammar of
    /// `topic`. Payloads that are ignored by design yield `Ok(None)`.
    pub fn parse(topic: CommandTopic, payload: &str) -> Result<Option<Self>> {
        match topic {
            CommandTopic::VolumeMuted => Ok(Self::parse_volume_muted(payload)),
            CommandTopic::VolumeLevel => Self::parse_volume_level(payload),
            CommandTopic::PlayerPosition => Self::parse_player_position(payload),
            CommandTopic::PlayerState => Self::parse_player_state(payload),
        }
    }

    #[must_use]
    pub fn parse_volume_muted(payload: &str) -> Option<Self> {
        match payload {
            "1" => Some(Self::VolumeMuted(true)),
            "0" => Some(Self::VolumeMuted(false)),
            _ => None,
        }
    }

    /// A leading sign makes the level relative to the current one.
    pub fn parse_volume_level(payload: &str) -> Result<Option<Self>> {
        if payload.is_empty() {
            return Ok(None);
        }

        let is_relative = payload.starts_with(['+', '-']);
        let value = truncate(payload)?;

        if is_relative {
            Ok(Some(Self::VolumeRelative(value)))
        } else {
            Ok(Some(Self::VolumeAbsolute(value)))
        }
    }

    pub fn parse_player_position(payload: &str) -> Result<Option<Self>> {
        if payload.is_empty() {
            return Ok(None);
        }

        truncate(payload).map(|position| Some(Self::PlayerPosition(position)))
    }

    /// Anything that is not a control token is taken as a stream to play.
    pub fn parse_player_state(payload: &str) -> Result<Option<Self>> {
        if let Ok(control) = payload.parse::<PlayerControl>() {
            return Ok(Some(Self::Player(control)));
        }

        if payload.is_empty() {
            return Ok(None);
        }

        PlayStream::parse(payload).map(|stream| Some(Self::PlayStream(stream)))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VolumeMuted(true) => write!(f, "mute"),
            Self::VolumeMuted(false) => write!(f, "unmute"),
            Self::VolumeAbsolute(level) => write!(f, "volume {level}"),
            Self::VolumeRelative(offset) => write!(f, "volume {offset:+}"),
            Self::PlayerPosition(position) => write!(f, "seek {position}s"),
            Self::Player(control) => write!(f, "{control}"),
            Self::PlayStream(stream) => write!(f, "play {stream}"),
        }
    }
}

/// Parses a decimal number and truncates it toward zero.
#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(payload: &str) -> Result<i64> {
    let value = payload.parse::<f64>()?;
    if !value.is_finite() {
        return Err(Error::invalid_argument(format!(
            "{payload} is not a finite number"
        )));
    }

    let value = value.trunc();
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(Error::out_of_range(format!(
            "{payload} does not fit in 64 bits"
        )));
    }

    Ok(value as i64)
}

/// Transport controls for the current media session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerControl {
    Resume,
    Pause,
    Stop,
    Skip,
    Rewind,
}

impl PlayerControl {
    pub const ALL: [Self; 5] = [
        Self::Resume,
        Self::Pause,
        Self::Stop,
        Self::Skip,
        Self::Rewind,
    ];

    /// The case-sensitive token that requests this control.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Resume => "RESUME",
            Self::Pause => "PAUSE",
            Self::Stop => "STOP",
            Self::Skip => "SKIP",
            Self::Rewind => "REWIND",
        }
    }
}

impl FromStr for PlayerControl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|control| control.token() == s)
            .ok_or_else(|| Error::invalid_argument(format!("unknown player control {s:?}")))
    }
}

impl fmt::Display for PlayerControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A request to cast a media stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayStream {
    pub content_url: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl PlayStream {
    #[must_use]
    pub fn new(content_url: &str, content_type: Option<String>) -> Self {
        Self {
            content_url: content_url.to_owned(),
            content_type,
        }
    }

    /// Decodes a stream request, picking the grammar by its first character.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when a JSON payload is malformed, has
    /// unknown or missing keys, or is an array not holding exactly two
    /// elements.
    pub fn parse(payload: &str) -> Result<Self> {
        if payload.starts_with('{') {
            Self::from_object(payload)
        } else if payload.starts_with('[') {
            Self::from_array(payload)
        } else {
            Ok(Self::from_url(payload))
        }
    }

    /// `{"content_url": "...", "content_type": "..."}`, type optional.
    pub fn from_object(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(Into::into)
    }

    /// `["url", "content type"]`, the type may be `null`.
    pub fn from_array(payload: &str) -> Result<Self> {
        let values: Vec<serde_json::Value> = serde_json::from_str(payload)?;
        let [content_url, content_type]: [serde_json::Value; 2] =
            values.try_into().map_err(|values: Vec<_>| {
                Error::invalid_argument(format!(
                    "array must hold two elements (url, content type) but holds {}",
                    values.len()
                ))
            })?;

        Ok(Self {
            content_url: serde_json::from_value(content_url)?,
            content_type: serde_json::from_value(content_type)?,
        })
    }

    /// A bare URL, with the content type guessed from its extension.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let content_type = guess_content_type(url);
        if content_type.is_none() {
            warn!("no content type found for {url}");
        }

        Self::new(url, content_type)
    }
}

impl fmt::Display for PlayStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content_url)?;
        if let Some(content_type) = &self.content_type {
            write!(f, " ({content_type})")?;
        }
        Ok(())
    }
}

/// Guesses a MIME type from the extension of the URL path.
///
/// Strings that do not parse as absolute URLs are treated as paths, minus
/// any query or fragment.
#[must_use]
pub fn guess_content_type(url: &str) -> Option<String> {
    let guess = match Url::parse(url) {
        Ok(url) => mime_guess::from_path(url.path()).first_raw(),
        Err(e) => {
            trace!("treating {url:?} as a path: {e}");
            let path = url.split(['?', '#']).next().unwrap_or_default();
            mime_guess::from_path(path).first_raw()
        }
    };

    guess.map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn mute_accepts_only_binary_tokens() {
        assert_eq!(
            Command::parse_volume_muted("1"),
            Some(Command::VolumeMuted(true))
        );
        assert_eq!(
            Command::parse_volume_muted("0"),
            Some(Command::VolumeMuted(false))
        );
        assert_eq!(Command::parse_volume_muted("2"), None);
        assert_eq!(Command::parse_volume_muted("true"), None);
        assert_eq!(Command::parse_volume_muted(""), None);
    }

    #[test]
    fn volume_level_sign_selects_relative() {
        assert_eq!(
            Command::parse_volume_level("55").unwrap(),
            Some(Command::VolumeAbsolute(55))
        );
        assert_eq!(
            Command::parse_volume_level("+5").unwrap(),
            Some(Command::VolumeRelative(5))
        );
        assert_eq!(
            Command::parse_volume_level("-10.9").unwrap(),
            Some(Command::VolumeRelative(-10))
        );
        assert_eq!(
            Command::parse_volume_level("50.7").unwrap(),
            Some(Command::VolumeAbsolute(50))
        );
        assert_eq!(Command::parse_volume_level("").unwrap(), None);
    }

    #[test]
    fn malformed_numbers_fail() {
        let err = Command::parse_volume_level("loud").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(Command::parse_volume_level("+").is_err());
        assert!(Command::parse_volume_level("nan").is_err());
        assert!(Command::parse_player_position("inf").is_err());

        let err = Command::parse_player_position("1e30").unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn position_truncates() {
        assert_eq!(
            Command::parse_player_position("93.99").unwrap(),
            Some(Command::PlayerPosition(93))
        );
        assert_eq!(Command::parse_player_position("").unwrap(), None);
    }

    #[test]
    fn control_tokens_are_case_sensitive() {
        for control in PlayerControl::ALL {
            assert_eq!(
                Command::parse_player_state(control.token()).unwrap(),
                Some(Command::Player(control))
            );
        }
        assert!("skip".parse::<PlayerControl>().is_err());
        assert_eq!(Command::parse_player_state("").unwrap(), None);
    }

    #[test]
    fn lowercase_token_becomes_stream() {
        assert_eq!(
            Command::parse_player_state("pause").unwrap(),
            Some(Command::PlayStream(PlayStream::new("pause", None)))
        );
    }

    #[test]
    fn object_grammar() {
        let stream =
            PlayStream::parse(r#"{"content_url": "http://x/a.mp3", "content_type": "audio/mpeg"}"#)
                .unwrap();
        assert_eq!(
            stream,
            PlayStream::new("http://x/a.mp3", Some("audio/mpeg".to_owned()))
        );

        let stream = PlayStream::parse(r#"{"content_url": "http://x/a"}"#).unwrap();
        assert_eq!(stream.content_type, None);

        assert!(PlayStream::parse(r#"{"content_type": "audio/mpeg"}"#).is_err());
        assert!(PlayStream::parse(r#"{"content_url": "a", "volume": 3}"#).is_err());
        assert!(PlayStream::parse("{not json").is_err());
    }

    #[test]
    fn array_grammar() {
        let stream = PlayStream::parse(r#"["http://x/a.mp3","audio/mpeg"]"#).unwrap();
        assert_eq!(
            stream,
            PlayStream::new("http://x/a.mp3", Some("audio/mpeg".to_owned()))
        );

        let stream = PlayStream::parse(r#"["http://x/a.mp3", null]"#).unwrap();
        assert_eq!(stream.content_type, None);

        let err = PlayStream::parse(r#"["a","b","c"]"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(PlayStream::parse(r#"["a"]"#).is_err());
        assert!(PlayStream::parse("[1, 2]").is_err());
    }

    #[test]
    fn bare_url_grammar() {
        assert_eq!(
            PlayStream::parse("http://x/song.mp3").unwrap().content_type.as_deref(),
            Some("audio/mpeg")
        );
        assert_eq!(
            PlayStream::parse("http://x/song.mp3?token=abc#t=10")
                .unwrap()
                .content_type
                .as_deref(),
            Some("audio/mpeg")
        );
        assert_eq!(
            PlayStream::parse("http://x/stream.nosuchext").unwrap().content_type,
            None
        );
        assert_eq!(PlayStream::parse("http://x/live").unwrap().content_type, None);
    }

    #[test]
    fn guesses_relative_paths() {
        assert_eq!(guess_content_type("song.mp3").as_deref(), Some("audio/mpeg"));
        assert_eq!(guess_content_type("clip.mp4?x=1").as_deref(), Some("video/mp4"));
        assert_eq!(guess_content_type("NOTHING"), None);
    }
}
