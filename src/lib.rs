//! MQTT bridge for cast receivers.
//!
//! Publishes the state of a Chromecast device on `chromecast/<device>/...`
//! topics and turns messages on `chromecast/<device>/command/...` topics
//! into control requests. The broker client and the device driver are
//! plugged in through [`handler::Publisher`] and
//! [`callback::ChangesCallback`].
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[macro_use]
extern crate log;

pub mod cache;
pub mod callback;
pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod status;
pub mod topic;
pub mod value;
