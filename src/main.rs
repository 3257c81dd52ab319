use std::{
    error::Error,
    io::{self, BufRead, Write},
    process,
};

use clap::{command, Parser, ValueHint};
use log::{debug, error, info, LevelFilter};

use castmqtt::{
    callback::ChangesCallback, config::Config, error::Result, handler::PropertyHandler,
    status::ConnectionStatus,
};

/// Profile to display when not built in release mode.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Profile to display when not built release mode.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
///
/// Reads `<topic> <payload>` lines from standard input, routes them like
/// broker messages and prints the messages that would be published.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    ///
    /// TOML file with a `device_name` key. Takes precedence over `--name`.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    config: Option<String>,

    /// Device name
    ///
    /// The device namespace in topics, as in `chromecast/<name>/...`.
    ///
    /// [default: system hostname]
    #[arg(short, long, value_hint = ValueHint::Hostname)]
    name: Option<String>,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
///
/// # Panics
///
/// Panics when a logger facade is already initialized.
fn init_logger(config: &Args) {
    let mut logger = env_logger::Builder::from_env(
        // Note: if you change the default logging level here, then you should
        // probably also change the verbosity levels below.
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if config.quiet || config.verbose > 0 {
        let level = match config.verbose {
            0 => {
                // Quiet and verbose are mutually exclusive, and `verbose` is 0
                // by default. So this arm means: quiet mode.
                LevelFilter::Warn
            }
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Filter log messages of external crates.
        logger.filter_module("castmqtt", level);
    }

    logger.init();
}

/// Logs every request instead of driving a device.
struct Console;

impl ChangesCallback for Console {
    fn on_volume_mute_requested(&mut self, is_muted: bool) {
        info!("requested mute: {is_muted}");
    }

    fn on_volume_level_relative_requested(&mut self, offset: i64) {
        info!("requested volume change: {offset:+}");
    }

    fn on_volume_level_absolute_requested(&mut self, level: i64) {
        info!("requested volume: {level}");
    }

    fn on_player_position_requested(&mut self, position: i64) {
        info!("requested position: {position}s");
    }

    fn on_player_play_stream_requested(&mut self, content_url: &str, content_type: Option<&str>) {
        info!(
            "requested stream: {content_url} ({})",
            content_type.unwrap_or("unknown type")
        );
    }

    fn on_player_pause_requested(&mut self) {
        info!("requested pause");
    }

    fn on_player_resume_requested(&mut self) {
        info!("requested resume");
    }

    fn on_player_stop_requested(&mut self) {
        info!("requested stop");
    }

    fn on_player_skip_requested(&mut self) {
        info!("requested skip");
    }

    fn on_player_rewind_requested(&mut self) {
        info!("requested rewind");
    }
}

/// Writes messages to standard output, one `<topic> <payload>` per line.
fn print_message(topic: &str, payload: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{topic} {payload}")?;
    stdout.flush()?;
    Ok(())
}

/// Resolves the device configuration from the command line arguments.
///
/// The device name is taken from, in order of precedence:
/// 1. the configuration file
/// 2. the `--name` argument
/// 3. the system hostname
/// 4. the package name
fn load_config(args: &Args) -> Result<Config> {
    if let Some(file) = &args.config {
        return Config::from_file(file).inspect_err(|e| {
            if e.kind == castmqtt::error::ErrorKind::NotFound {
                info!("create {file} with a device_name key, or use --name");
            }
        });
    }

    let name = args
        .name
        .clone()
        .or_else(sysinfo::System::host_name)
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());
    Config::new(&name)
}

/// Main application loop.
///
/// # Errors
///
/// Returns an error when the configuration is invalid or standard input
/// cannot be read.
fn run(args: &Args) -> std::result::Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let mut handler = PropertyHandler::with_config(&config, print_message, Console);

    for topic in handler.subscriptions() {
        info!("subscribed to {topic}");
    }

    handler.write_connection_status(ConnectionStatus::Connected);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // The payload may be empty or contain spaces; the topic may not.
        let (topic, payload) = line.split_once(' ').unwrap_or((line, ""));
        handler.handle(topic, payload);
    }

    handler.write_connection_status(ConnectionStatus::Disconnected);
    Ok(())
}

/// Main entry point of the application.
fn main() {
    // `clap` handles our command line arguments and help text.
    let args = Args::parse();
    init_logger(&args);

    // Dump command line arguments before we do anything more.
    // This aids in debugging of whatever comes next.
    debug!("Command {:#?}", args);

    let cmd = command!();
    let name = cmd.get_name().to_string();
    let version = cmd.get_version().unwrap_or("UNKNOWN").to_string();

    info!("starting {name}/{version}; {BUILD_PROFILE}");

    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}
