// Vicinity Listener - UDP observation collector
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Vicinity Listener
//!
//! Long-running UDP collector: receives capture-node datagrams, stamps them
//! with the receiver's clock, and appends them to the shared CSV sink the
//! analysis side reads. Exposes a small HTTP health endpoint.
//!
//! ## Usage
//!
//! ```bash
//! # Listen on the default ports
//! vicinity-listener
//!
//! # Custom ports and sink
//! vicinity-listener --udp-port 4210 --http-port 5000 --output rssi_data.csv
//! ```

mod sink;
mod wire;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use serde::Serialize;
use sink::CsvSink;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::EnvFilter;
use wire::Datagram;

/// Vicinity UDP observation collector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// UDP port to receive capture datagrams on
    #[arg(short, long, default_value = "4210")]
    udp_port: u16,

    /// HTTP port for the health endpoint
    #[arg(long, default_value = "5000")]
    http_port: u16,

    /// CSV sink to append observations to
    #[arg(short, long, default_value = "rssi_data.csv")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Counters shared between the UDP loop and the health endpoint.
#[derive(Debug, Default)]
struct ListenerState {
    received: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    received: u64,
    dropped: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Vicinity Listener v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(ListenerState::default());
    let sink = CsvSink::new(args.output.clone());

    // UDP collection loop, independent of the HTTP side.
    let udp_port = args.udp_port;
    let udp_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = udp_loop(udp_port, sink, udp_state).await {
            error!("UDP listener failed: {}", e);
            std::process::exit(1);
        }
    });

    let app = Router::new()
        .route("/health", get(health))
        .with_state(Arc::clone(&state));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.http_port));
    info!("health endpoint on http://{}/health", addr);

    match TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                error!("HTTP server failed: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("could not bind {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn udp_loop(
    port: u16,
    sink: CsvSink,
    state: Arc<ListenerState>,
) -> std::io::Result<()> {
    let socket = UdpSocket::bind(("0.0.0.0", port)).await?;
    info!("listening for capture datagrams on 0.0.0.0:{}", port);
    info!("appending observations to {}", sink.path().display());

    let mut buf = [0u8; 1024];
    loop {
        let (len, addr) = socket.recv_from(&mut buf).await?;

        match Datagram::parse_bytes(&buf[..len]) {
            Ok(datagram) => {
                let received_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
                match sink.append(&received_at, &datagram) {
                    Ok(()) => {
                        state.received.fetch_add(1, Ordering::Relaxed);
                        debug!(
                            "sighting from {}: {} at {} dBm",
                            addr, datagram.device_id, datagram.rssi
                        );
                    }
                    Err(e) => {
                        state.dropped.fetch_add(1, Ordering::Relaxed);
                        warn!("could not append observation: {}", e);
                    }
                }
            }
            Err(e) => {
                state.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("dropped malformed datagram from {}: {}", addr, e);
            }
        }
    }
}

async fn health(State(state): State<Arc<ListenerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        received: state.received.load(Ordering::Relaxed),
        dropped: state.dropped.load(Ordering::Relaxed),
    })
}
