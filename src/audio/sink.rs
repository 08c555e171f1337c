//! Utilities for turning a preview URL into a paused `rodio` sink.

use std::io::Cursor;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::playback::AudioError;

/// Download the whole preview into memory.
pub(super) fn fetch_preview(client: &Client, url: &str) -> Result<Vec<u8>, AudioError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| AudioError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::Fetch(format!("HTTP {status}")));
    }

    let bytes = response
        .bytes()
        .map_err(|e| AudioError::Fetch(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Create a paused `Sink` playing `bytes`, plus the track length when known.
pub(super) fn create_sink(
    stream: &OutputStream,
    bytes: Vec<u8>,
    hint: Option<&str>,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let byte_len = bytes.len() as u64;
    let mut builder = Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(byte_len)
        .with_seekable(true);
    if let Some(ext) = hint {
        builder = builder.with_hint(ext);
    }

    let source = builder
        .build()
        .map_err(|e| AudioError::Decode(e.to_string()))?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}

/// File extension of the last path segment of `url`, if it looks like one.
pub(super) fn format_hint(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 5 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}
