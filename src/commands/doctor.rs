// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Integrity findings as `(issue, detail)` pairs; empty when healthy.
pub fn check(store: &Store) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    let mut seen = HashSet::new();
    for p in store.products() {
        if !seen.insert(p.id) {
            rows.push(("duplicate_product_id".into(), p.id.to_string()));
        }
        match p.category {
            None => rows.push(("uncategorized_product".into(), format!("{} {}", p.id, p.name))),
            Some(c) if !p.subcategory.is_empty() && !c.allows(&p.subcategory) => rows.push((
                "subcategory_mismatch".into(),
                format!("{} {}: '{}' not in {}", p.id, p.name, p.subcategory, c),
            )),
            Some(_) => {}
        }
        if p.price < Decimal::ZERO {
            rows.push(("negative_price".into(), format!("{} {}", p.id, p.name)));
        }
    }

    for id in store.costs().keys() {
        if store.product(*id).is_none() {
            rows.push(("orphan_cost_override".into(), id.to_string()));
        }
    }

    let mut seen = HashSet::new();
    for t in store.transactions() {
        if !seen.insert(t.id) {
            rows.push(("duplicate_transaction_id".into(), t.id.to_string()));
        }
        if t.amount <= Decimal::ZERO {
            rows.push(("non_positive_amount".into(), format!("{} {}", t.id, t.name)));
        }
    }
    rows
}

pub fn handle(store: &Store) -> Result<()> {
    let rows: Vec<Vec<String>> = check(store).into_iter().map(|(a, b)| vec![a, b]).collect();
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
