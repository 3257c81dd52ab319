//! End-to-end tests of the property handler: topics in, callbacks out, and
//! device state in, canonical messages out.

use castmqtt::{
    callback::ChangesCallback,
    command::{Command, PlayStream, PlayerControl},
    error::Result,
    handler::{PropertyHandler, Publisher},
    status::{CastData, CastStatus, ConnectionStatus, MediaStatus, PlayerStatus},
    topic::Topic,
};
use rstest::rstest;

#[derive(Debug, Default)]
struct Broker {
    sent: Vec<(String, String)>,
}

impl Publisher for Broker {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<()> {
        self.sent.push((topic.to_owned(), payload.to_owned()));
        Ok(())
    }
}

impl Broker {
    fn payloads(&self) -> Vec<&str> {
        self.sent.iter().map(|(_, payload)| payload.as_str()).collect()
    }
}

/// Records every request as the command that would produce it.
#[derive(Debug, Default)]
struct Requests(Vec<Command>);

impl ChangesCallback for Requests {
    fn on_volume_mute_requested(&mut self, is_muted: bool) {
        self.0.push(Command::VolumeMuted(is_muted));
    }

    fn on_volume_level_relative_requested(&mut self, offset: i64) {
        self.0.push(Command::VolumeRelative(offset));
    }

    fn on_volume_level_absolute_requested(&mut self, level: i64) {
        self.0.push(Command::VolumeAbsolute(level));
    }

    fn on_player_position_requested(&mut self, position: i64) {
        self.0.push(Command::PlayerPosition(position));
    }

    fn on_player_play_stream_requested(&mut self, content_url: &str, content_type: Option<&str>) {
        self.0.push(Command::PlayStream(PlayStream::new(
            content_url,
            content_type.map(str::to_owned),
        )));
    }

    fn on_player_pause_requested(&mut self) {
        self.0.push(Command::Player(PlayerControl::Pause));
    }

    fn on_player_resume_requested(&mut self) {
        self.0.push(Command::Player(PlayerControl::Resume));
    }

    fn on_player_stop_requested(&mut self) {
        self.0.push(Command::Player(PlayerControl::Stop));
    }

    fn on_player_skip_requested(&mut self) {
        self.0.push(Command::Player(PlayerControl::Skip));
    }

    fn on_player_rewind_requested(&mut self) {
        self.0.push(Command::Player(PlayerControl::Rewind));
    }
}

fn kitchen() -> PropertyHandler<Broker, Requests> {
    PropertyHandler::new("kitchen", Broker::default(), Requests::default())
}

fn stream(url: &str, content_type: Option<&str>) -> Command {
    Command::PlayStream(PlayStream::new(url, content_type.map(str::to_owned)))
}

#[rstest]
#[case("chromecast/kitchen/player_state", true)]
#[case("chromecast/kitchen/command/volume_level", true)]
#[case("chromecast/bedroom/player_state", false)]
#[case("malformed", false)]
#[case("", false)]
fn matches_device_namespace(#[case] topic: &str, #[case] expected: bool) {
    assert_eq!(kitchen().matches(topic), expected);
}

#[rstest]
#[case("volume_muted", "1", Some(Command::VolumeMuted(true)))]
#[case("volume_muted", "0", Some(Command::VolumeMuted(false)))]
#[case("volume_muted", "2", None)]
#[case("volume_level", "55", Some(Command::VolumeAbsolute(55)))]
#[case("volume_level", "+5", Some(Command::VolumeRelative(5)))]
#[case("volume_level", "-10.9", Some(Command::VolumeRelative(-10)))]
#[case("volume_level", "50.7", Some(Command::VolumeAbsolute(50)))]
#[case("volume_level", "", None)]
#[case("volume_level", "max", None)]
#[case("player_position", "120.5", Some(Command::PlayerPosition(120)))]
#[case("player_position", "", None)]
#[case("player_position", "later", None)]
#[case("player_state", "SKIP", Some(Command::Player(PlayerControl::Skip)))]
#[case("player_state", "REWIND", Some(Command::Player(PlayerControl::Rewind)))]
#[case("player_state", "", None)]
#[case(
    "player_state",
    r#"["http://x/a.mp3","audio/mpeg"]"#,
    Some(stream("http://x/a.mp3", Some("audio/mpeg")))
)]
#[case("player_state", r#"["a","b","c"]"#, None)]
#[case(
    "player_state",
    r#"{"content_url": "http://x/a", "content_type": "video/mp4"}"#,
    Some(stream("http://x/a", Some("video/mp4")))
)]
#[case("player_state", r#"{"url": "http://x/a"}"#, None)]
#[case(
    "player_state",
    "http://x/song.mp3",
    Some(stream("http://x/song.mp3", Some("audio/mpeg")))
)]
#[case(
    "player_state",
    "http://x/stream.nosuchext",
    Some(stream("http://x/stream.nosuchext", None))
)]
#[case("player_state", "play", Some(stream("play", None)))]
fn routes_commands(#[case] command: &str, #[case] payload: &str, #[case] expected: Option<Command>) {
    let mut handler = kitchen();
    handler.handle(&format!("chromecast/kitchen/command/{command}"), payload);

    let (broker, requests) = handler.into_parts();
    assert_eq!(requests.0, expected.into_iter().collect::<Vec<_>>());
    assert!(broker.sent.is_empty());
}

#[test]
fn skip_is_requested_once() {
    let mut handler = kitchen();
    handler.handle("chromecast/kitchen/command/player_state", b"SKIP".as_slice());
    assert_eq!(handler.callback().0, [Command::Player(PlayerControl::Skip)]);
}

#[test]
fn payloads_are_trimmed() {
    let mut handler = kitchen();
    handler.handle("chromecast/kitchen/command/volume_level", "  42\r\n");
    handler.handle("chromecast/kitchen/command/player_state", "\tPAUSE ");
    assert_eq!(
        handler.callback().0,
        [
            Command::VolumeAbsolute(42),
            Command::Player(PlayerControl::Pause)
        ]
    );
}

#[test]
fn other_devices_are_ignored() {
    let mut handler = kitchen();
    handler.handle("chromecast/bedroom/command/volume_muted", "1");
    handler.handle("chromecast/kitchen/volume_muted", "1");
    handler.handle("chromecast", "1");
    assert!(handler.callback().0.is_empty());
}

#[test]
fn subscribes_to_command_topics() {
    let handler = kitchen();
    let mut topics: Vec<_> = handler.subscriptions().collect();
    topics.sort_unstable();
    assert_eq!(
        topics,
        [
            "chromecast/kitchen/command/player_position",
            "chromecast/kitchen/command/player_state",
            "chromecast/kitchen/command/volume_level",
            "chromecast/kitchen/command/volume_muted",
        ]
    );
}

#[rstest]
#[case(0.5, 0.5, &["50"])]
#[case(0.5, 0.6, &["50", "60"])]
#[case(0.0, 1.0, &["0", "100"])]
#[case(0.333, 5.0, &["33", "5"])]
fn volume_writes_are_deduplicated(#[case] first: f64, #[case] second: f64, #[case] expected: &[&str]) {
    let mut handler = kitchen();
    handler.write(Topic::VolumeLevel, first);
    handler.write(Topic::VolumeLevel, second);

    let (broker, _) = handler.into_parts();
    assert_eq!(broker.payloads(), expected);
    assert!(broker
        .sent
        .iter()
        .all(|(topic, _)| topic == "chromecast/kitchen/volume_level"));
}

#[test]
fn cast_status_writes_each_field() {
    let mut handler = kitchen();
    let status = CastStatus {
        app_name: Some("Spotify".to_owned()),
        volume_level: Some(0.25),
        volume_muted: Some(false),
    };
    handler.write_cast_status(&status);
    handler.write_cast_status(&status);

    let (broker, _) = handler.into_parts();
    assert_eq!(
        broker.sent,
        [
            ("chromecast/kitchen/current_app".to_owned(), "Spotify".to_owned()),
            ("chromecast/kitchen/volume_level".to_owned(), "25".to_owned()),
            ("chromecast/kitchen/volume_muted".to_owned(), "0".to_owned()),
        ]
    );
}

#[test]
fn grouped_writes_are_gated_per_topic() {
    let mut handler = kitchen();
    handler.write_player_status(&PlayerStatus {
        state: Some("PLAYING".to_owned()),
        current_time: Some(12.4),
        duration: Some(215.6),
    });
    handler.write_player_status(&PlayerStatus {
        state: Some("PLAYING".to_owned()),
        current_time: Some(13.4),
        duration: Some(215.6),
    });

    let (broker, _) = handler.into_parts();
    assert_eq!(broker.payloads(), ["PLAYING", "12", "216", "13"]);
}

#[test]
fn media_status_publishes_absent_fields_as_empty() {
    let mut handler = kitchen();
    handler.write_media_status(&MediaStatus {
        title: Some("Blue in Green".to_owned()),
        artist: Some("Miles Davis".to_owned()),
        track: Some(3),
        images: Some(vec!["http://x/cover.jpg".to_owned()]),
        content_type: Some("audio/mpeg".to_owned()),
        ..MediaStatus::default()
    });

    assert_eq!(handler.published(Topic::MediaTitle), Some("Blue in Green"));
    assert_eq!(handler.published(Topic::MediaAlbumName), Some(""));
    assert_eq!(handler.published(Topic::MediaTrack), Some("3"));
    assert_eq!(
        handler.published(Topic::MediaImages),
        Some(r#"["http://x/cover.jpg"]"#)
    );
    assert_eq!(handler.published(Topic::MediaContentUrl), Some(""));
    assert_eq!(handler.publisher().sent.len(), 8);
}

#[test]
fn connection_and_cast_data() {
    let mut handler = kitchen();
    handler.write_connection_status(ConnectionStatus::Connected);
    handler.write_cast_data(&CastData {
        cast_type: Some("audio".to_owned()),
        friendly_name: Some("Kitchen speaker".to_owned()),
    });
    handler.write_connection_status(ConnectionStatus::Connected);
    handler.write_connection_status(ConnectionStatus::Lost);

    let (broker, _) = handler.into_parts();
    assert_eq!(
        broker.payloads(),
        ["CONNECTED", "audio", "Kitchen speaker", "LOST"]
    );
    assert_eq!(broker.sent[2].0, "chromecast/kitchen/friendly_name");
}

#[rstest]
#[case(true.into(), "1")]
#[case(false.into(), "0")]
#[case(None::<String>.into(), "")]
#[case(150_i64.into(), "150")]
fn formats_non_float_values(#[case] value: castmqtt::value::Value, #[case] expected: &str) {
    let mut handler = kitchen();
    handler.write(Topic::PlayerState, value);
    assert_eq!(handler.published(Topic::PlayerState), Some(expected));
}
