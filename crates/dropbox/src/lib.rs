//! sharelink-dropbox: Dropbox API adapter for sharelink
//!
//! This crate provides the implementation of the ShareProvider trait
//! over the Dropbox v2 HTTP API. It is the only crate that talks to
//! the network.

pub mod client;
mod wire;

pub use client::DropboxClient;
pub use wire::classify_error;
