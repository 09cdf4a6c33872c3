//! Control client for the wrapper process
//!
//! Connects to the launcher's control port, retrying at a fixed
//! interval until the port is up. The launcher owns the lifetime of
//! both processes, so retries are unbounded.

use std::io::Write;
use std::net::{Ipv4Addr, TcpStream};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::control::protocol::{self, ControlMessage};

/// Client side of the control connection
pub struct ControlClient {
    stream: TcpStream,
}

impl ControlClient {
    /// Connect to the launcher's control port
    pub fn connect(port: u16) -> Result<Self> {
        let stream = TcpStream::connect((Ipv4Addr::LOCALHOST, port))
            .with_context(|| format!("Failed to connect to control port {}", port))?;
        Ok(Self { stream })
    }

    /// Connect, retrying at a fixed interval until the listener is up
    pub fn connect_with_retry(port: u16, interval: Duration) -> Self {
        loop {
            match TcpStream::connect((Ipv4Addr::LOCALHOST, port)) {
                Ok(stream) => {
                    tracing::debug!("Connected to launcher on port {}", port);
                    return Self { stream };
                }
                Err(e) => {
                    tracing::debug!("Connect failed (will retry): {}", e);
                    thread::sleep(interval);
                }
            }
        }
    }

    /// Send one control message
    pub fn send(&mut self, msg: &ControlMessage) -> Result<()> {
        let bytes = protocol::encode(msg)?;
        self.stream
            .write_all(&bytes)
            .context("Failed to send control message")?;
        self.stream.flush().context("Failed to flush control stream")?;
        Ok(())
    }
}
