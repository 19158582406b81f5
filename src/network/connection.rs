//! Connection Manager
//!
//! Owns the socket and its buffered read/write streams. Opening, closing,
//! and reconnecting all reduce to constructing or dropping a `Connection`;
//! dropping releases the socket.

use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{Result, RedwireError};
use crate::protocol::{read_reply, Reply, ReplyReader};

/// A single open connection to the server
pub struct Connection {
    /// Buffered reader half, wrapped by the reply reader
    reader: ReplyReader<BufReader<TcpStream>>,

    /// Buffered writer half
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a fresh connection to the configured host and port
    ///
    /// Applies the optional connect/read/write timeouts and disables
    /// Nagle's algorithm. Any pre-existing connection should be dropped by
    /// the caller before or after this call; dropping closes its socket.
    pub fn open(config: &Config) -> Result<Self> {
        let addr = config.addr();
        let stream = match config.connect_timeout() {
            Some(timeout) => {
                let resolved = addr
                    .to_socket_addrs()?
                    .next()
                    .ok_or_else(|| RedwireError::IllegalState("address resolved to nothing"))?;
                TcpStream::connect_timeout(&resolved, timeout)?
            }
            None => TcpStream::connect(&addr)?,
        };

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connection established to {}", peer_addr);

        Ok(Self {
            reader: ReplyReader::new(BufReader::new(read_stream)),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Write one encoded command frame and flush it
    pub fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Block until one complete reply is decoded
    pub fn read_reply(&mut self) -> Result<Reply> {
        read_reply(&mut self.reader)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::debug!("Connection to {} released", self.peer_addr);
    }
}
