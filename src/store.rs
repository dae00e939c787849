// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory catalog and ledger, persisted as JSON documents.
//!
//! `main` loads one `Store` at start-up, commands mutate it through the
//! methods below, and mutating commands call [`Store::save`] before exiting.

use crate::catalog::CostMap;
use crate::error::ShopError;
use crate::models::{Category, Product, ProductDraft, Transaction, TransactionDraft, TxKind};
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const PRODUCTS_KEY: &str = "products";
pub const TRANSACTIONS_KEY: &str = "transactions";
pub const COSTS_KEY: &str = "product-costs";
pub const WATERMARK_KEY: &str = "id-watermark";

/// Anything that accepts new transactions.
pub trait Ledger {
    fn record(&mut self, draft: TransactionDraft) -> Result<i64, ShopError>;
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
    transactions: Vec<Transaction>,
    costs: CostMap,
    id_watermark: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub is_profit: bool,
}

impl LedgerTotals {
    pub fn label(&self) -> &'static str {
        if self.is_profit { "Profit" } else { "Loss" }
    }
}

/// Catalog a fresh data file starts with.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Good Day".into(),
            price: Decimal::from(25),
            category: Some(Category::Biscuit),
            subcategory: String::new(),
            brand: "Britannia".into(),
            in_stock: true,
            description: "Delicious coconut cookies".into(),
            image: None,
            audio: None,
        },
        Product {
            id: 2,
            name: "Gold Flake".into(),
            price: Decimal::from(150),
            category: Some(Category::Cigarette),
            subcategory: "Gold Flake".into(),
            brand: "ITC".into(),
            in_stock: false,
            description: String::new(),
            image: None,
            audio: None,
        },
    ]
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples() -> Self {
        let products = sample_products();
        let id_watermark = products.iter().map(|p| p.id).max().unwrap_or(0);
        Store {
            products,
            id_watermark,
            ..Default::default()
        }
    }

    pub fn load(conn: &Connection) -> Result<Store> {
        let products: Option<Vec<Product>> = read_doc(conn, PRODUCTS_KEY)?;
        let seeded = products.is_none();
        let mut store = match products {
            Some(products) => Store {
                products,
                ..Default::default()
            },
            None => Store::with_samples(),
        };
        store.transactions = read_doc(conn, TRANSACTIONS_KEY)?.unwrap_or_default();
        store.costs = read_doc(conn, COSTS_KEY)?.unwrap_or_default();
        let stored_mark: i64 = read_doc(conn, WATERMARK_KEY)?.unwrap_or(0);
        store.id_watermark = store
            .products
            .iter()
            .map(|p| p.id)
            .chain(store.transactions.iter().map(|t| t.id))
            .chain(std::iter::once(stored_mark))
            .max()
            .unwrap_or(0);
        debug!(
            products = store.products.len(),
            transactions = store.transactions.len(),
            seeded,
            "store loaded"
        );
        Ok(store)
    }

    /// Writes every document in one SQLite transaction.
    pub fn save(&self, conn: &Connection) -> Result<()> {
        let tx = conn.unchecked_transaction()?;
        write_doc(&tx, PRODUCTS_KEY, &self.products)?;
        write_doc(&tx, TRANSACTIONS_KEY, &self.transactions)?;
        write_doc(&tx, COSTS_KEY, &self.costs)?;
        write_doc(&tx, WATERMARK_KEY, &self.id_watermark)?;
        tx.commit()?;
        debug!("store saved");
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn costs(&self) -> &CostMap {
        &self.costs
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Millisecond timestamp, bumped past every id handed out before.
    fn allocate_id(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let id = now.max(self.id_watermark + 1);
        self.id_watermark = id;
        id
    }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<&Product, ShopError> {
        draft.validate()?;
        let id = self.allocate_id();
        let product = Product {
            id,
            name: draft.name.trim().to_string(),
            price: draft.price,
            category: draft.category,
            subcategory: draft.subcategory,
            brand: draft.brand,
            in_stock: draft.in_stock,
            description: draft.description,
            image: draft.image,
            audio: draft.audio,
        };
        info!(id, name = %product.name, "product added");
        self.products.insert(0, product);
        Ok(&self.products[0])
    }

    /// Removes the product together with its cost override.
    pub fn delete_product(&mut self, id: i64) -> Result<Product, ShopError> {
        let pos = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ShopError::ProductNotFound(id))?;
        self.costs.remove(&id);
        let removed = self.products.remove(pos);
        info!(id, name = %removed.name, "product deleted");
        Ok(removed)
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<&Transaction, ShopError> {
        draft.validate()?;
        let id = self.allocate_id();
        let tx = Transaction {
            id,
            name: draft.name.trim().to_string(),
            amount: draft.amount,
            date: draft.date,
            time: draft.time,
            kind: draft.kind,
            audio: draft.audio,
            photo: draft.photo,
        };
        info!(id, kind = %tx.kind, amount = %tx.amount, "transaction recorded");
        self.transactions.insert(0, tx);
        Ok(&self.transactions[0])
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<Transaction, ShopError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(ShopError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(pos);
        info!(id, "transaction deleted");
        Ok(removed)
    }

    /// Books the product's listed price as an expense.
    pub fn buy_product(&mut self, id: i64) -> Result<&Transaction, ShopError> {
        let product = self.product(id).ok_or(ShopError::ProductNotFound(id))?;
        if !product.in_stock {
            return Err(ShopError::OutOfStock(product.name.clone()));
        }
        let now = chrono::Local::now();
        let draft = TransactionDraft {
            name: format!("Purchase: {}", product.name),
            amount: product.price,
            date: now.date_naive(),
            time: now.format("%H:%M").to_string(),
            kind: TxKind::Expense,
            audio: None,
            photo: None,
        };
        self.add_transaction(draft)
    }

    pub fn set_cost(&mut self, id: i64, cost: Decimal) -> Result<(), ShopError> {
        if self.product(id).is_none() {
            return Err(ShopError::ProductNotFound(id));
        }
        if cost < Decimal::ZERO {
            return Err(ShopError::InvalidProduct(format!(
                "cost must not be negative, got {}",
                cost
            )));
        }
        self.costs.insert(id, cost);
        Ok(())
    }

    pub fn clear_cost(&mut self, id: i64) -> bool {
        self.costs.remove(&id).is_some()
    }

    pub fn totals(&self) -> LedgerTotals {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for t in &self.transactions {
            match t.kind {
                TxKind::Income => income += t.amount,
                TxKind::Expense => expense += t.amount,
            }
        }
        let net = income - expense;
        LedgerTotals {
            income,
            expense,
            net,
            is_profit: net >= Decimal::ZERO,
        }
    }
}

impl Ledger for Store {
    fn record(&mut self, draft: TransactionDraft) -> Result<i64, ShopError> {
        self.add_transaction(draft).map(|t| t.id)
    }
}

fn read_doc<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM documents WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => {
            let v = serde_json::from_str(&s)
                .with_context(|| format!("Corrupt '{}' document", key))?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

fn write_doc<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO documents(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![key, json],
    )?;
    Ok(())
}
