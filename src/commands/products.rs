// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{self, Analytics, Group};
use crate::models::{Category, KNOWN_BRANDS, ProductDraft};
use crate::store::Store;
use crate::utils::{
    filter_spec_from, fmt_money, get_currency_symbol, maybe_print_json, parse_decimal, parse_id,
    pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, store, sub)?,
        Some(("list", sub)) => list(conn, store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let removed = store.delete_product(id)?;
            store.save(conn)?;
            println!("Removed product '{}'", removed.name);
        }
        Some(("buy", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let tx = store.buy_product(id)?;
            let line = format!(
                "Recorded expense '{}' of {}",
                tx.name,
                fmt_money(&tx.amount, &get_currency_symbol(conn)?)
            );
            store.save(conn)?;
            println!("{}", line);
        }
        Some(("cost", sub)) => cost(conn, store, sub)?,
        Some(("categories", _)) => categories(),
        _ => {}
    }
    Ok(())
}

fn trimmed(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn add(conn: &Connection, store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let draft = ProductDraft {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        price: parse_decimal(sub.get_one::<String>("price").unwrap())?,
        category: Some(sub.get_one::<String>("category").unwrap().parse::<Category>()?),
        subcategory: trimmed(sub, "subcategory").unwrap_or_default(),
        brand: trimmed(sub, "brand").unwrap_or_default(),
        in_stock: !sub.get_flag("out_of_stock"),
        description: trimmed(sub, "description").unwrap_or_default(),
        image: trimmed(sub, "image"),
        audio: trimmed(sub, "audio"),
    };
    let product = store.add_product(draft)?;
    let line = format!("Added product '{}' (id {})", product.name, product.id);
    store.save(conn)?;
    println!("{}", line);
    Ok(())
}

#[derive(Serialize)]
pub struct CatalogView<'a> {
    pub groups: Vec<Group<'a>>,
    pub analytics: Analytics,
}

/// Filtered, grouped catalog plus analytics for the `list` flags in `sub`.
pub fn catalog_view<'a>(store: &'a Store, sub: &clap::ArgMatches) -> Result<CatalogView<'a>> {
    let spec = filter_spec_from(sub)?;
    let filtered = catalog::filter(store.products(), &spec);
    Ok(CatalogView {
        analytics: catalog::aggregate(&filtered, store.costs()),
        groups: catalog::group(&filtered),
    })
}

fn list(conn: &Connection, store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let view = catalog_view(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let n = view.analytics.total_products;
    println!("{} product{} found", n, if n == 1 { "" } else { "s" });
    for g in &view.groups {
        let rows = g
            .products
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.subcategory.clone(),
                    p.brand.clone(),
                    fmt_money(&p.price, &sym),
                    fmt_money(&catalog::cost_of(p, store.costs()), &sym),
                    if p.in_stock { "In Stock" } else { "Out of Stock" }.to_string(),
                ]
            })
            .collect();
        println!("{} ({})", g.category, g.products.len());
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Subcategory", "Brand", "Price", "Cost", "Stock"],
                rows
            )
        );
    }
    println!("{}", super::reports::analytics_table(&view.analytics, &sym));
    Ok(())
}

fn cost(conn: &Connection, store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            store.set_cost(id, amount)?;
            store.save(conn)?;
            println!("Cost for product {} set to {}", id, amount);
        }
        Some(("clear", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            if store.clear_cost(id) {
                store.save(conn)?;
                println!("Cost override for product {} cleared", id);
            } else {
                println!("No cost override for product {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn categories() {
    let rows = Category::ALL
        .iter()
        .map(|c| vec![c.to_string(), c.subcategories().join(", ")])
        .collect();
    println!("{}", pretty_table(&["Category", "Subcategories"], rows));
    println!("Brands: {}", KNOWN_BRANDS.join(", "));
}
