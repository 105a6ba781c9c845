//! Space-Track element-set provider adapter.

pub mod client;

pub use client::SpaceTrackClient;
