// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shopbook::models::{TransactionDraft, TxKind};
use shopbook::store::Store;
use shopbook::{cli, commands::transactions};

fn setup() -> Store {
    let mut store = Store::new();
    for (i, kind) in [TxKind::Income, TxKind::Expense, TxKind::Income].into_iter().enumerate() {
        store
            .add_transaction(TransactionDraft {
                name: format!("T{}", i + 1),
                amount: Decimal::from(10),
                date: NaiveDate::from_ymd_opt(2025, 1, i as u32 + 1).unwrap(),
                time: "09:00".into(),
                kind,
                audio: None,
                photo: None,
            })
            .unwrap();
    }
    store
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["shopbook", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_limit_respected() {
    let store = setup();
    let rows = transactions::query_rows(&store, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "T3");
}

#[test]
fn list_filters_by_type() {
    let store = setup();
    let rows = transactions::query_rows(&store, &list_matches(&["--type", "expense"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "T2");
}

#[test]
fn add_via_cli_persists() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    shopbook::db::init_schema(&conn).unwrap();
    let mut store = Store::load(&conn).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "shopbook", "tx", "add", "--name", " Milk delivery ", "--amount", "120.50", "--type",
        "income", "--date", "2025-02-03", "--time", "07:05",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, &mut store, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }

    let reloaded = Store::load(&conn).unwrap();
    let t = &reloaded.transactions()[0];
    assert_eq!(t.name, "Milk delivery");
    assert_eq!(t.amount, Decimal::new(12050, 2));
    assert_eq!(t.kind, TxKind::Income);
    assert_eq!(t.time, "07:05");
}

#[test]
fn add_rejects_non_positive_amount() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    shopbook::db::init_schema(&conn).unwrap();
    let mut store = Store::load(&conn).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "shopbook", "tx", "add", "--name", "Refund", "--amount", "0",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        let err = transactions::handle(&conn, &mut store, tx_m).unwrap_err();
        assert!(err.to_string().contains("amount must be positive"));
    } else {
        panic!("no tx subcommand");
    }
    assert!(store.transactions().is_empty());
}
