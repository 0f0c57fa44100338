//! Per-connection session handling
//!
//! A session serves one accepted socket for the connection's full lifetime:
//! read one request line, query the index, write one response line, repeat.
//! Clients may pipeline sequential requests; they are served strictly in
//! arrival order with no overlap. Sessions end only when the client
//! disconnects or an I/O error occurs; there are no timeouts and the server
//! never closes a connection proactively.

use log::{info, warn};
use std::net::SocketAddr;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::index::{ContentHasher, SharedIndex};
use crate::server::protocol::{self, LINE_END};

/// Serve one connection until the client disconnects or an I/O error occurs.
pub(crate) async fn run<H: ContentHasher>(stream: TcpStream, peer: SocketAddr, index: SharedIndex<H>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            // Clean EOF: the client is done with this connection.
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("read failed for {}: {}", peer, e);
                // Best-effort: report the failure before closing.
                let _ = write_half
                    .write_all(format!("{}{}", e, LINE_END).as_bytes())
                    .await;
                break;
            }
        }

        let started = Instant::now();
        let mut response = dispatch::<H>(&line, &index);
        info!(
            "request: {} -> {} ({:.1}ms)",
            line.trim_end_matches(LINE_END),
            response,
            started.elapsed().as_secs_f64() * 1e3
        );

        response.push(LINE_END);
        if let Err(e) = write_half.write_all(response.as_bytes()).await {
            warn!("write failed for {}: {}", peer, e);
            break;
        }
    }

    info!("closing connection from {}", peer);
}

/// Parse one request line and resolve it against the index.
///
/// Parse failures answer `bad request` without touching the index.
fn dispatch<H: ContentHasher>(line: &str, index: &SharedIndex<H>) -> String {
    match protocol::parse_request::<H>(line) {
        Some((size, digest)) => match index.borrow().pull(size, &digest) {
            Some(path) => path.display().to_string(),
            None => protocol::NOT_FOUND.to_owned(),
        },
        None => protocol::BAD_REQUEST.to_owned(),
    }
}
