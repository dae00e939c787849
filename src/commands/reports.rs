// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Analytics;
use crate::commands::products::catalog_view;
use crate::store::Store;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, pretty_table};
use anyhow::Result;
use comfy_table::Table;
use rusqlite::Connection;

pub fn handle(conn: &Connection, store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pnl", sub)) => pnl(conn, store, sub)?,
        Some(("catalog", sub)) => {
            let view = catalog_view(store, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.analytics)? {
                println!(
                    "{}",
                    analytics_table(&view.analytics, &get_currency_symbol(conn)?)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn pnl(conn: &Connection, store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let totals = store.totals();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    let sym = get_currency_symbol(conn)?;
    let data = vec![
        vec!["Income".to_string(), fmt_money(&totals.income, &sym)],
        vec!["Expense".to_string(), fmt_money(&totals.expense, &sym)],
        vec![totals.label().to_string(), fmt_money(&totals.net.abs(), &sym)],
    ];
    println!("{}", pretty_table(&["", "Amount"], data));
    Ok(())
}

pub fn analytics_table(a: &Analytics, sym: &str) -> Table {
    let data = vec![
        vec!["Products".to_string(), a.total_products.to_string()],
        vec!["In stock".to_string(), a.in_stock_products.to_string()],
        vec!["Out of stock".to_string(), a.out_of_stock_products.to_string()],
        vec!["Total value".to_string(), fmt_money(&a.total_value, sym)],
        vec!["Total cost".to_string(), fmt_money(&a.total_cost, sym)],
        vec!["Profit".to_string(), fmt_money(&a.total_profit, sym)],
        vec!["Loss".to_string(), fmt_money(&a.total_loss, sym)],
        vec!["Average price".to_string(), fmt_money(&a.avg_price, sym)],
        vec![
            "Margin".to_string(),
            format!("{:.1}%", a.profit_margin.round_dp(1)),
        ],
    ];
    pretty_table(&["Metric", "Value"], data)
}
