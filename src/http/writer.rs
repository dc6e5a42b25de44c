use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ServerError;
use crate::http::response::Response;

/// Writes all of `payload` to `stream`.
///
/// A single write may accept only part of the buffer, so this keeps sending
/// the unsent suffix until everything is accepted. A write that accepts zero
/// bytes means the peer is gone and is reported as [`ServerError::Send`].
pub async fn transmit<W>(payload: &[u8], stream: &mut W) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    let mut sent = 0;

    while sent < payload.len() {
        match stream.write(&payload[sent..]).await {
            Ok(0) => {
                return Err(ServerError::Send(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "connection closed while writing",
                )));
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ServerError::Send(e)),
        }
    }

    Ok(())
}

/// Sends a [`Response`] as two transmissions: the status line, then the body.
pub struct ResponseWriter<'a> {
    response: &'a Response,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(response: &'a Response) -> Self {
        Self { response }
    }

    /// Number of bytes this response puts on the wire.
    pub fn wire_len(&self) -> usize {
        self.response.status_line().len() + self.response.body.len()
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> Result<(), ServerError>
    where
        W: AsyncWrite + Unpin,
    {
        transmit(self.response.status_line().as_bytes(), stream).await?;
        transmit(&self.response.body, stream).await?;
        stream.flush().await.map_err(ServerError::Send)
    }
}
