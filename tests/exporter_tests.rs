// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use shopbook::models::{TransactionDraft, TxKind};
use shopbook::store::Store;
use shopbook::{cli, commands::exporter};
use tempfile::tempdir;

fn store_with_one_tx() -> (Store, i64) {
    let mut store = Store::new();
    let id = store
        .add_transaction(TransactionDraft {
            name: "Corner Shop".into(),
            amount: Decimal::new(1234, 2),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            time: "18:45".into(),
            kind: TxKind::Expense,
            audio: None,
            photo: Some("receipt.jpg".into()),
        })
        .unwrap()
        .id;
    (store, id)
}

fn run_export(store: &Store, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["shopbook", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(store, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn export_transactions_writes_pretty_json() {
    let (store, id) = store_with_one_tx();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&store, &["transactions", "--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": id,
                "date": "2025-01-02",
                "time": "18:45",
                "type": "expense",
                "name": "Corner Shop",
                "amount": "12.34",
                "audio": null,
                "photo": "receipt.jpg"
            }
        ])
    );
}

#[test]
fn export_products_csv_has_header_and_rows() {
    let store = Store::with_samples();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("products.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&store, &["products", "--out", &out_str]).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[1], "name");
    let names: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap()[1].to_string())
        .collect();
    assert_eq!(names, ["Good Day", "Gold Flake"]);
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let (store, _) = store_with_one_tx();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run_export(&store, &["transactions", "--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}
