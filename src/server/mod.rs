//! TCP query server
//!
//! Accepts connections and answers point queries ("is there a file of size S
//! with hash H, and if so where?") against the shared index. Sessions are
//! spawned as local tasks on the single-threaded runtime, so they share the
//! index with the crawler without any locking.
//!
//! # Submodules
//!
//! - `protocol` - Wire format constants and the request parser
//! - `session` - Per-connection read/dispatch/respond loop

pub mod protocol;
mod session;

use log::{info, warn};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::index::{ContentHasher, SharedIndex};

/// The query server: a bound listener plus the index it answers from.
pub struct QueryServer<H: ContentHasher + 'static> {
    listener: TcpListener,
    index: SharedIndex<H>,
}

impl<H: ContentHasher + 'static> QueryServer<H> {
    /// Bind the listener. Binding failures (port in use, bad address) are
    /// fatal for startup; everything after is not.
    pub async fn bind(addr: SocketAddr, index: SharedIndex<H>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, index })
    }

    /// The address the listener is bound to (useful after binding port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections indefinitely.
    ///
    /// Each accepted socket spawns a session task and the acceptor
    /// immediately rearms; a failed accept is logged and the acceptor
    /// continues serving future connections.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    info!("accepting connection from {}", peer);
                    tokio::task::spawn_local(session::run::<H>(stream, peer, self.index.clone()));
                }
                Err(e) => warn!("failed to accept connection: {}", e),
            }
        }
    }
}
