//! ChirpStack integration webhook receiver.
//!
//! Accepts ChirpStack v4 integration events over HTTP as protobuf JSON or
//! binary protobuf, decodes them against a fixed set of event schemas,
//! persists a normalized JSON record in SQLite and mirrors each event to a
//! JSON file.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod events;
pub mod export;
pub mod interfaces;
pub mod proto;
pub mod storage;
pub mod utils;
