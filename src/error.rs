// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Business-rule failures raised by the store and the engines.
///
/// Commands wrap these in `anyhow` so the CLI prints the message as-is.
#[derive(Debug, Error, PartialEq)]
pub enum ShopError {
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Subcategory '{subcategory}' is not allowed for {category}")]
    SubcategoryNotAllowed {
        category: String,
        subcategory: String,
    },

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Transaction {0} not found")]
    TransactionNotFound(i64),

    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Unknown operator '{0}' (use + - × ÷ =)")]
    InvalidOperator(String),

    #[error("Unknown transaction type '{0}' (use income|expense)")]
    InvalidKind(String),
}
