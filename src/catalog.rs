// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Product};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Assumed cost when no override exists: 70% of the listed price.
pub const DEFAULT_COST_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Product id -> assumed acquisition cost.
pub type CostMap = BTreeMap<i64, Decimal>;

/// Narrowing predicates for a product listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    pub search: String,
    pub category: Option<Category>,
    /// Tested on its own, whether or not `category` is set.
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl FilterSpec {
    /// Sets the lower bound from raw text; unparseable text leaves it unset.
    pub fn min_price_text(mut self, raw: &str) -> Self {
        self.min_price = parse_bound(raw);
        self
    }

    pub fn max_price_text(mut self, raw: &str) -> Self {
        self.max_price = parse_bound(raw);
        self
    }

    pub fn matches(&self, p: &Product) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = p.name.to_lowercase().contains(&needle)
            || p.brand.to_lowercase().contains(&needle);
        matches_search
            && self.category.is_none_or(|c| p.category == Some(c))
            && self.subcategory.as_ref().is_none_or(|s| &p.subcategory == s)
            && self.brand.as_ref().is_none_or(|b| &p.brand == b)
            && self.min_price.is_none_or(|min| p.price >= min)
            && self.max_price.is_none_or(|max| p.price <= max)
    }
}

fn parse_bound(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<Decimal>() {
        Ok(d) => Some(d),
        Err(_) => {
            warn!(bound = trimmed, "ignoring unparseable price bound");
            None
        }
    }
}

pub fn filter<'a>(products: &'a [Product], spec: &FilterSpec) -> Vec<&'a Product> {
    products.iter().filter(|p| spec.matches(p)).collect()
}

/// A category bucket of a filtered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Group<'a> {
    pub category: &'static str,
    pub products: Vec<&'a Product>,
}

/// Buckets products by category, keeping first-seen group order and the
/// input order inside each group.
pub fn group<'a>(filtered: &[&'a Product]) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    for &p in filtered {
        let key = p.category.map(Category::name).unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|g| g.category == key) {
            Some(g) => g.products.push(p),
            None => groups.push(Group {
                category: key,
                products: vec![p],
            }),
        }
    }
    groups
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub total_loss: Decimal,
    pub total_products: usize,
    pub in_stock_products: usize,
    pub out_of_stock_products: usize,
    pub avg_price: Decimal,
    pub profit_margin: Decimal,
}

pub fn cost_of(p: &Product, costs: &CostMap) -> Decimal {
    costs
        .get(&p.id)
        .copied()
        .unwrap_or_else(|| p.price.saturating_mul(DEFAULT_COST_RATIO))
}

/// Totals over `filtered`. Sums saturate at the `Decimal` bounds instead of
/// overflowing, so documents that bypassed input validation still report.
pub fn aggregate(filtered: &[&Product], costs: &CostMap) -> Analytics {
    let total_value = filtered
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.price));
    let total_cost = filtered
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(cost_of(p, costs)));
    let total_products = filtered.len();
    let in_stock_products = filtered.iter().filter(|p| p.in_stock).count();
    let net = total_value.saturating_sub(total_cost);

    Analytics {
        total_value,
        total_cost,
        total_profit: net.max(Decimal::ZERO),
        total_loss: (-net).max(Decimal::ZERO),
        total_products,
        in_stock_products,
        out_of_stock_products: total_products - in_stock_products,
        avg_price: if total_products > 0 {
            total_value / Decimal::from(total_products)
        } else {
            Decimal::ZERO
        },
        profit_margin: if total_value > Decimal::ZERO {
            match net.checked_div(total_value) {
                Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
                None if net.is_sign_negative() => Decimal::MIN,
                None => Decimal::MAX,
            }
        } else {
            Decimal::ZERO
        },
    }
}
