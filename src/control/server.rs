//! Control server for the launcher process
//!
//! Binds an ephemeral TCP port on localhost and services a single
//! connection with a blocking message loop. One connection at a time is
//! all the window lifecycle needs.

use std::net::{Ipv4Addr, TcpListener};

use anyhow::{Context, Result};
use serde_json::Deserializer;

use crate::control::protocol::ControlMessage;

/// Whether the message loop should continue after a handled message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Control server bound to an ephemeral localhost port
pub struct ControlServer {
    listener: TcpListener,
}

impl ControlServer {
    /// Bind to an OS-assigned port on localhost
    pub fn bind() -> Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .context("Failed to bind control port")?;
        Ok(Self { listener })
    }

    #[cfg(test)]
    pub(crate) fn from_listener(listener: TcpListener) -> Self {
        Self { listener }
    }

    /// The port the server is listening on
    pub fn port(&self) -> Result<u16> {
        Ok(self
            .listener
            .local_addr()
            .context("Failed to read control port")?
            .port())
    }

    /// Accept one connection and service its message loop
    ///
    /// Invokes `handler` for each decoded message until the handler
    /// returns [`Flow::Stop`], the peer disconnects, or the stream stops
    /// yielding well-formed documents. Peer disconnect ends the session
    /// the same way an explicit exit does.
    pub fn serve<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(ControlMessage) -> Flow,
    {
        let (stream, peer) = self
            .listener
            .accept()
            .context("Failed to accept control connection")?;
        tracing::debug!("Control connection from {}", peer);

        for msg in Deserializer::from_reader(stream).into_iter::<ControlMessage>() {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("Control stream ended: {}", e);
                    break;
                }
            };
            tracing::debug!("Control message: {:?}", msg);
            if handler(msg) == Flow::Stop {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::protocol::encode;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::net::TcpStream;

    fn connect(port: u16) -> TcpStream {
        TcpStream::connect((Ipv4Addr::LOCALHOST, port)).expect("Should connect to server")
    }

    #[test]
    fn test_exit_terminates_loop() {
        let server = ControlServer::bind().unwrap();
        let port = server.port().unwrap();

        let sender = std::thread::spawn(move || {
            let mut stream = connect(port);
            stream
                .write_all(&encode(&ControlMessage::Exit).unwrap())
                .unwrap();
        });

        let mut seen = Vec::new();
        server
            .serve(|msg| {
                seen.push(msg);
                match msg {
                    ControlMessage::Exit => Flow::Stop,
                    _ => Flow::Continue,
                }
            })
            .unwrap();

        sender.join().unwrap();
        assert_eq!(seen, vec![ControlMessage::Exit]);
    }

    #[test]
    fn test_back_to_back_documents_in_one_segment() {
        let server = ControlServer::bind().unwrap();
        let port = server.port().unwrap();

        let sender = std::thread::spawn(move || {
            let mut stream = connect(port);
            // Two documents in a single write, no separator
            stream
                .write_all(br#"{"type":"open"}{"type":"exit"}"#)
                .unwrap();
        });

        let mut seen = Vec::new();
        server
            .serve(|msg| {
                seen.push(msg);
                match msg {
                    ControlMessage::Exit => Flow::Stop,
                    _ => Flow::Continue,
                }
            })
            .unwrap();

        sender.join().unwrap();
        assert_eq!(seen, vec![ControlMessage::Open, ControlMessage::Exit]);
    }

    #[test]
    fn test_peer_disconnect_ends_loop() {
        let server = ControlServer::bind().unwrap();
        let port = server.port().unwrap();

        let sender = std::thread::spawn(move || {
            let mut stream = connect(port);
            stream
                .write_all(&encode(&ControlMessage::Close).unwrap())
                .unwrap();
            // Drop the stream without sending exit
        });

        let mut seen = Vec::new();
        server
            .serve(|msg| {
                seen.push(msg);
                Flow::Continue
            })
            .unwrap();

        sender.join().unwrap();
        assert_eq!(seen, vec![ControlMessage::Close]);
    }

    #[test]
    fn test_malformed_document_ends_loop() {
        let server = ControlServer::bind().unwrap();
        let port = server.port().unwrap();

        let sender = std::thread::spawn(move || {
            let mut stream = connect(port);
            stream.write_all(br#"{"type":"open"}garbage"#).unwrap();
        });

        let mut seen = Vec::new();
        server
            .serve(|msg| {
                seen.push(msg);
                Flow::Continue
            })
            .unwrap();

        sender.join().unwrap();
        assert_eq!(seen, vec![ControlMessage::Open]);
    }
}
