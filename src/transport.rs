//! TCP link to the game emulator
//!
//! The emulator connects to the bot and writes one JSON snapshot per frame,
//! then waits for one JSON command back. There is no length prefix, so
//! incoming bytes are buffered until a complete JSON value parses.

use serde_json::Deserializer;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::protocol::{Command, MatchSnapshot};

const READ_CHUNK: usize = 4096;

pub struct GameConnection<S = TcpStream> {
    stream: S,
    peer: String,
    buffer: Vec<u8>,
}

impl GameConnection<TcpStream> {
    /// Listen on `address` and wait for the emulator to connect
    pub async fn accept(address: &str) -> Result<Self> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|e| Error::io(format!("bind {address}"), e))?;
        info!("Waiting for the game on {}", address);

        let (stream, peer) = listener
            .accept()
            .await
            .map_err(|e| Error::io("accept game connection", e))?;
        stream
            .set_nodelay(true)
            .map_err(|e| Error::io("set TCP_NODELAY", e))?;

        Ok(Self::from_stream(stream, peer.to_string()))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> GameConnection<S> {
    pub fn from_stream(stream: S, peer: String) -> Self {
        Self {
            stream,
            peer,
            buffer: Vec::with_capacity(READ_CHUNK),
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Next snapshot, or `None` once the emulator has closed the connection
    pub async fn receive(&mut self) -> Result<Option<MatchSnapshot>> {
        loop {
            if let Some(snapshot) = self.take_buffered()? {
                return Ok(Some(snapshot));
            }

            let read = self
                .stream
                .read_buf(&mut self.buffer)
                .await
                .map_err(|e| Error::io("read snapshot", e))?;
            if read == 0 {
                if !self.buffer.iter().all(u8::is_ascii_whitespace) {
                    debug!("Discarding {} bytes of partial snapshot", self.buffer.len());
                }
                return Ok(None);
            }
        }
    }

    fn take_buffered(&mut self) -> Result<Option<MatchSnapshot>> {
        let next = {
            let mut values = Deserializer::from_slice(&self.buffer).into_iter::<MatchSnapshot>();
            values
                .next()
                .map(|parsed| parsed.map(|snapshot| (snapshot, values.byte_offset())))
        };

        match next {
            Some(Ok((snapshot, consumed))) => {
                self.buffer.drain(..consumed);
                Ok(Some(snapshot))
            }
            Some(Err(e)) if e.is_eof() => Ok(None),
            Some(Err(e)) => Err(e.into()),
            None => {
                // Only whitespace buffered
                self.buffer.clear();
                Ok(None)
            }
        }
    }

    pub async fn send(&mut self, command: &Command) -> Result<()> {
        let payload = serde_json::to_vec(command)?;
        self.stream
            .write_all(&payload)
            .await
            .map_err(|e| Error::io("send command", e))?;
        self.stream
            .flush()
            .await
            .map_err(|e| Error::io("flush command", e))
    }
}
