use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::error::ServerError;
use crate::http::parser::{decode_request, parse_request};
use crate::http::request::Request;
use crate::http::resolver::{resolve, ResolvedPath};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Largest request accepted. Anything past this is never read.
pub const MAX_REQUEST_SIZE: usize = 1024;

/// Handles exactly one request on one stream, then closes it.
pub struct Connection<S> {
    stream: S,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing { request: Request, raw: String },
    Writing(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            stream,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the connection to completion.
    ///
    /// The stream is shut down on every exit path, including errors, and is
    /// closed when `self` is dropped at the end of this call.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(buf) => Self::classify(&buf),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing { request, raw } => {
                    ConnectionState::Writing(self.respond(&request, &raw).await)
                }

                ConnectionState::Writing(response) => {
                    let writer = ResponseWriter::new(&response);
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("sending response")?;

                    tracing::info!(
                        status = response.status.as_u16(),
                        bytes = writer.wire_len(),
                        "Response sent"
                    );
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Performs the single read of at most [`MAX_REQUEST_SIZE`] bytes.
    ///
    /// Returns `None` if the peer closed without sending anything.
    async fn read_request(&mut self) -> anyhow::Result<Option<Vec<u8>>> {
        let mut temp = [0u8; MAX_REQUEST_SIZE];
        let n = self
            .stream
            .read(&mut temp)
            .await
            .context("reading request")?;

        if n == 0 {
            tracing::debug!("Peer closed before sending a request");
            return Ok(None);
        }

        Ok(Some(temp[..n].to_vec()))
    }

    /// Decodes and parses the raw request bytes into the next state.
    fn classify(buf: &[u8]) -> ConnectionState {
        let text = match decode_request(buf) {
            Ok(text) => text,
            Err(ServerError::MalformedRequest(lossy)) => {
                tracing::info!(request = %lossy, "Request is not valid UTF-8");
                return ConnectionState::Writing(Response::not_implemented(&lossy));
            }
            Err(other) => {
                tracing::error!(error = %other, "Unexpected decode failure");
                return ConnectionState::Writing(Response::internal_error());
            }
        };

        tracing::debug!(request = %text, "Received request");

        match parse_request(text) {
            Some(request) => ConnectionState::Processing {
                request,
                raw: text.to_string(),
            },
            None => {
                tracing::info!(request = %text, "Unhandled request");
                ConnectionState::Writing(Response::not_implemented(text))
            }
        }
    }

    async fn respond(&self, request: &Request, raw: &str) -> Response {
        if !request.is_get() {
            tracing::info!(method = %request.method, path = %request.path, "Unhandled request");
            return Response::not_implemented(raw);
        }

        match resolve(&request.path, &self.config.document_root).await {
            ResolvedPath::Safe(path) => match read_file(path).await {
                Ok(contents) => Response::ok(contents),
                Err(e) => {
                    tracing::error!(error = ?e, path = %request.path, "Serving internal error");
                    Response::internal_error()
                }
            },
            ResolvedPath::Forbidden => {
                tracing::info!(path = %request.path, "Forbidden path");
                Response::forbidden()
            }
            ResolvedPath::NotFound => {
                tracing::info!(path = %request.path, "Not found");
                Response::not_found()
            }
        }
    }
}

async fn read_file(path: std::path::PathBuf) -> Result<Bytes, ServerError> {
    match fs::read(&path).await {
        Ok(contents) => Ok(Bytes::from(contents)),
        Err(source) => Err(ServerError::FileRead { path, source }),
    }
}
