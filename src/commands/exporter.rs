// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{Context, Result, anyhow};
use serde_json::json;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        Some(("products", sub)) => export_products(store, sub),
        _ => Ok(()),
    }
}

fn target(sub: &clap::ArgMatches) -> Result<(String, String)> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim().to_string();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }
    Ok((fmt, out))
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let txs = store.transactions();
    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
        wtr.write_record(["id", "date", "time", "type", "name", "amount", "audio", "photo"])?;
        for t in txs {
            wtr.write_record([
                t.id.to_string(),
                t.date.to_string(),
                t.time.clone(),
                t.kind.to_string(),
                t.name.clone(),
                t.amount.to_string(),
                t.audio.clone().unwrap_or_default(),
                t.photo.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = txs
            .iter()
            .map(|t| {
                json!({
                    "id": t.id, "date": t.date.to_string(), "time": t.time, "type": t.kind.as_str(),
                    "name": t.name, "amount": t.amount.to_string(), "audio": t.audio, "photo": t.photo
                })
            })
            .collect();
        std::fs::write(&out, serde_json::to_string_pretty(&items)?)
            .with_context(|| format!("Write {}", out))?;
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}

fn export_products(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let products = store.products();
    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
        wtr.write_record([
            "id", "name", "price", "cost", "category", "subcategory", "brand", "in_stock",
            "description",
        ])?;
        for p in products {
            wtr.write_record([
                p.id.to_string(),
                p.name.clone(),
                p.price.to_string(),
                store.costs().get(&p.id).map(|c| c.to_string()).unwrap_or_default(),
                p.category.map(|c| c.to_string()).unwrap_or_default(),
                p.subcategory.clone(),
                p.brand.clone(),
                p.in_stock.to_string(),
                p.description.clone(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(&out, serde_json::to_string_pretty(products)?)
            .with_context(|| format!("Write {}", out))?;
    }
    println!("Exported {} products to {}", products.len(), out);
    Ok(())
}
