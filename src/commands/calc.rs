// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::Calculator;
use crate::models::TxKind;
use crate::store::Store;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let keys = m.get_one::<String>("keys").unwrap();
    let mut calc = Calculator::new();
    calc.run_keys(keys)?;
    println!("{}", calc.display());

    let Some(kind) = m.get_one::<String>("commit") else {
        return Ok(());
    };
    let kind: TxKind = kind.parse()?;
    let committed = match m.get_one::<String>("name").map(|s| s.trim()) {
        Some(name) if !name.is_empty() => calc.commit_as(kind, name, store)?,
        _ => calc.commit(kind, store)?,
    };
    match committed {
        Some(id) => {
            store.save(conn)?;
            println!("Added {} as {} (id {})", calc.display(), kind, id);
        }
        None => println!("Nothing recorded: {} is not a positive amount", calc.display()),
    }
    Ok(())
}
