// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use shopbook::{cli, commands, db, store::Store};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let (conn, path) = db::open_or_init(matches.get_one::<PathBuf>("db").map(|p| p.as_path()))?;
    let mut store = Store::load(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            store.save(&conn)?;
            println!("Database initialized at {}", path.display());
        }
        Some(("product", sub)) => commands::products::handle(&conn, &mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &mut store, sub)?,
        Some(("calc", sub)) => commands::calc::handle(&conn, &mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
