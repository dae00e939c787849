// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ShopError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Biscuit,
    Kurkura,
    Cigarette,
    Pani,
    #[serde(rename = "Karga Diye Hai")]
    KargaDiyeHai,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Biscuit,
        Category::Kurkura,
        Category::Cigarette,
        Category::Pani,
        Category::KargaDiyeHai,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Biscuit => "Biscuit",
            Category::Kurkura => "Kurkura",
            Category::Cigarette => "Cigarette",
            Category::Pani => "Pani",
            Category::KargaDiyeHai => "Karga Diye Hai",
        }
    }

    /// Subcategories a product of this category may carry.
    pub fn subcategories(self) -> &'static [&'static str] {
        match self {
            Category::Biscuit => &[
                "Good Day",
                "Butter & Bake",
                "Monaco Magic",
                "Dream Lite",
                "Hide & Seek",
                "Marie Gold",
                "Parle-G",
            ],
            Category::Kurkura => &[
                "Rude Bhujia",
                "Bhujia Dal",
                "Moon Dal",
                "Mastana Khush",
                "Kacha Aam",
                "Royal Use",
                "Tooya Chips",
                "Lage",
            ],
            Category::Cigarette => &[
                "Gold Flake",
                "Super Star",
                "Advance",
                "Four Square",
                "Indie Mint",
                "Indie Clove",
                "Gold Flake King",
                "Charm",
                "Charm King",
                "Editions",
                "Black Fite",
                "Royal White",
            ],
            Category::Pani => &["Bisleri", "Kinley", "Aquafina", "Local Water"],
            Category::KargaDiyeHai => &["Zeera", "Sprite", "Thums Up", "Other"],
        }
    }

    pub fn allows(self, subcategory: &str) -> bool {
        self.subcategories().contains(&subcategory)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ShopError::UnknownCategory(wanted.to_string()))
    }
}

/// Stored documents may carry `"category": ""`; that reads as no category.
fn blank_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

pub const KNOWN_BRANDS: [&str; 8] = [
    "Britannia",
    "Parle",
    "Cadbury",
    "ITC",
    "PepsiCo",
    "Coca Cola",
    "Bisleri",
    "Local",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    #[serde(default, deserialize_with = "blank_category")]
    pub category: Option<Category>,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub brand: String,
    pub in_stock: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Fields a caller supplies to create a product; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub category: Option<Category>,
    pub subcategory: String,
    pub brand: String,
    pub in_stock: bool,
    pub description: String,
    pub image: Option<String>,
    pub audio: Option<String>,
}

impl ProductDraft {
    /// Input checks applied before a product enters the catalog.
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.name.trim().is_empty() {
            return Err(ShopError::InvalidProduct("name is required".into()));
        }
        if self.price <= Decimal::ZERO {
            return Err(ShopError::InvalidProduct(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        let category = self
            .category
            .ok_or_else(|| ShopError::InvalidProduct("category is required".into()))?;
        if !self.subcategory.is_empty() && !category.allows(&self.subcategory) {
            return Err(ShopError::SubcategoryNotAllowed {
                category: category.to_string(),
                subcategory: self.subcategory.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(ShopError::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub time: String, // HH:MM, local
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub time: String,
    pub kind: TxKind,
    pub audio: Option<String>,
    pub photo: Option<String>,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.name.trim().is_empty() {
            return Err(ShopError::InvalidTransaction("name is required".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ShopError::InvalidTransaction(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}
