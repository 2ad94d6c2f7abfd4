// gymstats - GPL-3.0-or-later
// This file is part of gymstats.
//
// gymstats is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// gymstats is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with gymstats.  If not, see <https://www.gnu.org/licenses/>.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gymstats::server::{self, AppState};
use gymstats::timezone::LocalZone;

#[derive(Parser, Debug)]
#[command(name = "gymstats")]
#[command(version)]
#[command(about = "Serve the gym occupancy dashboard and regenerate its data snapshot", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 8002)]
    port: u16,

    /// Directory holding the daily log files and the dashboard page
    #[arg(long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Civil time zone the chart axis is rendered in
    #[arg(long, value_name = "ZONE", default_value = "Europe/Tallinn")]
    timezone: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger with millisecond precision timestamps
    // Set RUST_LOG environment variable to override (e.g., RUST_LOG=debug)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    log::info!(
        "gymstats starting up (version {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let zone = LocalZone::resolve(&args.timezone);
    if let LocalZone::Fixed(offset) = zone {
        log::warn!(
            "time zone {:?} not found in the zone database, using fixed offset {offset}",
            args.timezone
        );
    }

    let state = AppState::new(args.data_dir.clone(), zone);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!("server running at http://localhost:{}/", args.port);
    log::info!("dashboard: http://localhost:{}/dashboard.html", args.port);
    log::info!(
        "generate data: POST http://localhost:{}/generate-data",
        args.port
    );
    log::info!(
        "generate data range: POST http://localhost:{}/generate-data-range",
        args.port
    );

    server::serve(listener, state)
        .await
        .context("HTTP server error")
}
