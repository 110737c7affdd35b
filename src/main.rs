// src/main.rs
//
// JSON-lines front end: one request per stdin line, one response per
// stdout line. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use datamesh_registry::application::{AppState, CommandRouter};
use datamesh_registry::config::StoreConfig;
use datamesh_registry::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};

fn main() -> anyhow::Result<()> {
    // 1. LOGGING (also captures `log` records from the library)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. INFRASTRUCTURE
    let config = StoreConfig::from_env().context("reading store configuration")?;
    log::info!("Using catalog at {}", config.database_path.display());

    let pool = Arc::new(
        create_connection_pool(&config).context("opening the catalog database")?,
    );

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn).context("initializing the catalog schema")?;
        verify_database_integrity(&conn).context("checking catalog integrity")?;
    }

    // 3. APPLICATION STATE
    let state = AppState::build(pool);
    let router = CommandRouter::new();

    // 4. REQUEST LOOP
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if stdin.read_until(b'\n', &mut buf).context("reading request")? == 0 {
            break;
        }

        let Some(response) = router.handle_raw_line(&state, &buf) else {
            continue;
        };

        serde_json::to_writer(&mut stdout, &response)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }

    log::info!("Input closed, shutting down");
    Ok(())
}
