// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionDraft, TxKind};
use crate::store::Store;
use crate::utils::{
    fmt_money, get_currency_symbol, maybe_print_json, parse_date, parse_decimal, parse_id,
    parse_time, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, store, sub)?,
        Some(("list", sub)) => list(conn, store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let removed = store.delete_transaction(id)?;
            store.save(conn)?;
            println!("Removed transaction '{}'", removed.name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let now = chrono::Local::now();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => now.date_naive(),
    };
    let time = match sub.get_one::<String>("time") {
        Some(t) => parse_time(t)?,
        None => now.format("%H:%M").to_string(),
    };
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let draft = TransactionDraft {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date,
        time,
        kind,
        audio: sub.get_one::<String>("audio").map(|s| s.trim().to_string()),
        photo: sub.get_one::<String>("photo").map(|s| s.trim().to_string()),
    };
    let tx = store.add_transaction(draft)?;
    let line = format!(
        "Recorded {} {} on {} {} '{}' (id {})",
        tx.kind,
        fmt_money(&tx.amount, &get_currency_symbol(conn)?),
        tx.date,
        tx.time,
        tx.name,
        tx.id
    );
    store.save(conn)?;
    println!("{}", line);
    Ok(())
}

/// Transactions selected by the `list` flags, newest first.
pub fn query_rows<'a>(store: &'a Store, sub: &clap::ArgMatches) -> Result<Vec<&'a Transaction>> {
    let kind = match sub.get_one::<String>("type") {
        Some(k) => Some(k.parse::<TxKind>()?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(store
        .transactions()
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .take(limit)
        .collect())
}

fn list(conn: &Connection, store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.time.clone(),
                t.kind.to_string(),
                t.name.clone(),
                fmt_money(&t.amount, &sym),
                media_flags(t),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Time", "Type", "Name", "Amount", "Media"], rows)
    );
    Ok(())
}

fn media_flags(t: &Transaction) -> String {
    let mut flags = Vec::new();
    if t.audio.is_some() {
        flags.push("audio");
    }
    if t.photo.is_some() {
        flags.push("photo");
    }
    flags.join(", ")
}
