// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Gopher has no length framing. A request is the selector followed by CRLF, and the
//! response is every byte the server sends until it closes the connection.

use std::time::Duration;

use tokio::{io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
            net::TcpStream,
            time::timeout};

use crate::{DEBUG_GOPHER_TRANSPORT, Location, TransportError};

pub mod transport_constants {
    pub const CRLF: &str = "\r\n";
    pub const READ_BUFFER_SIZE: usize = 1024;
}

use transport_constants::{CRLF, READ_BUFFER_SIZE};

/// Anything that can turn a [`Location`] into the raw lines of its response. The
/// [`crate::Navigator`] only talks to the network through this seam, so tests can swap
/// in canned responses.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the connection, the request, or the response
    /// fails.
    async fn fetch(&mut self, location: &Location) -> Result<Vec<String>, TransportError>;
}

/// The real network [`Fetch`] implementation. There's no timeout unless one is
/// configured, in which case the whole exchange (connect, send, read until close) has to
/// finish within it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpFetcher {
    pub maybe_timeout: Option<Duration>,
}

impl TcpFetcher {
    #[must_use]
    pub fn new(maybe_timeout: Option<Duration>) -> Self { Self { maybe_timeout } }
}

impl Fetch for TcpFetcher {
    async fn fetch(&mut self, location: &Location) -> Result<Vec<String>, TransportError> {
        match self.maybe_timeout {
            None => fetch(location).await,
            Some(after) => match timeout(after, fetch(location)).await {
                Ok(result) => result,
                Err(_elapsed) => Err(TransportError::TimedOut {
                    address: location.to_string(),
                    after,
                }),
            },
        }
    }
}

/// Connect to the host and port of the `location`, send its selector, and return the
/// response split into lines.
///
/// # Errors
///
/// Returns an error if:
/// - The host name can't be resolved, or the connection is refused or reset
/// - The selector can't be written
/// - Reading fails before the server closes the connection
pub async fn fetch(location: &Location) -> Result<Vec<String>, TransportError> {
    let address = location.to_string();

    DEBUG_GOPHER_TRANSPORT.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "Connecting...", address = %address);
    });

    let mut stream = TcpStream::connect((location.host(), location.port()))
        .await
        .map_err(|source| TransportError::Connect {
            address: address.clone(),
            source,
        })?;

    exchange(&mut stream, location.selector(), &address).await
}

/// The request/response exchange on an already open stream.
/// - The trait bounds on this function are so that it can be tested w/ a mock from
///   [`tokio::io::duplex`].
/// - The write half is never shut down. The server decides when the response is over by
///   closing the connection.
///
/// # Errors
///
/// Returns an error if writing the selector or reading the response fails.
pub async fn exchange<S: AsyncRead + AsyncWrite + Unpin>(
    stream: &mut S,
    selector: &str,
    address: &str,
) -> Result<Vec<String>, TransportError> {
    let to_send_error = |source| TransportError::Send {
        address: address.to_string(),
        source,
    };

    stream
        .write_all(request_bytes(selector).as_slice())
        .await
        .map_err(to_send_error)?;
    stream.flush().await.map_err(to_send_error)?;

    let mut response = Vec::with_capacity(READ_BUFFER_SIZE);
    let mut read_buffer = [0_u8; READ_BUFFER_SIZE];
    loop {
        let bytes_read =
            stream
                .read(&mut read_buffer)
                .await
                .map_err(|source| TransportError::Read {
                    address: address.to_string(),
                    source,
                })?;
        if bytes_read == 0 {
            break;
        }
        response.extend_from_slice(&read_buffer[..bytes_read]);
    }

    DEBUG_GOPHER_TRANSPORT.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Received response",
            address = %address,
            byte_count = %response.len()
        );
    });

    Ok(split_crlf_lines(&response))
}

/// An empty selector is allowed, it asks for the server's root listing.
#[must_use]
pub fn request_bytes(selector: &str) -> Vec<u8> {
    let mut it = Vec::with_capacity(selector.len() + CRLF.len());
    it.extend_from_slice(selector.as_bytes());
    it.extend_from_slice(CRLF.as_bytes());
    it
}

/// Split the response on CRLF. If the last element is empty (the response ended with a
/// separator) it is dropped, so a terminated and an unterminated last line produce the
/// same sequence.
///
/// Content is assumed to be a text compatible encoding. Invalid UTF-8 is replaced with
/// `U+FFFD` rather than failing the whole page.
#[must_use]
pub fn split_crlf_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines: Vec<String> = text.split(CRLF).map(str::to_owned).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
