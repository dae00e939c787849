// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use shopbook::{cli, commands::config, db, utils};

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["shopbook", "config"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("config", m)) => config::handle(conn, m),
        _ => panic!("no config subcommand"),
    }
}

#[test]
fn currency_symbol_defaults_and_updates() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    assert_eq!(utils::get_currency_symbol(&conn).unwrap(), "₹");

    run(&conn, &["set", "currency-symbol", " $ "]).unwrap();
    assert_eq!(utils::get_currency_symbol(&conn).unwrap(), "$");
}

#[test]
fn unknown_setting_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let err = run(&conn, &["set", "theme", "dark"]).unwrap_err();
    assert!(err.to_string().contains("Unknown setting 'theme'"));
}

#[test]
fn every_setting_round_trips_by_name() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for setting in config::Setting::ALL {
        assert_eq!(config::Setting::lookup(setting.name()).unwrap(), setting);
        run(&conn, &["set", setting.name(), "x"]).unwrap();
        run(&conn, &["get", setting.name()]).unwrap();
    }
}
