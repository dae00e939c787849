// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency_symbol, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    CurrencySymbol,
}

impl Setting {
    pub const ALL: [Setting; 1] = [Setting::CurrencySymbol];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Setting::CurrencySymbol => "currency-symbol",
        }
    }

    /// Key in the `settings` table.
    fn storage_key(self) -> &'static str {
        match self {
            Setting::CurrencySymbol => "currency_symbol",
        }
    }

    pub fn lookup(raw: &str) -> Result<Setting> {
        let raw = raw.trim();
        Setting::ALL
            .into_iter()
            .find(|s| s.name() == raw)
            .ok_or_else(|| {
                let known: Vec<_> = Setting::ALL.iter().map(|s| s.name()).collect();
                anyhow!("Unknown setting '{}' (known: {})", raw, known.join(", "))
            })
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let setting = Setting::lookup(sub.get_one::<String>("key").unwrap())?;
            let value = match setting {
                Setting::CurrencySymbol => get_currency_symbol(conn)?,
            };
            println!("{}", value);
        }
        Some(("set", sub)) => {
            let setting = Setting::lookup(sub.get_one::<String>("key").unwrap())?;
            let value = sub.get_one::<String>("value").unwrap().trim();
            if value.is_empty() {
                return Err(anyhow!("Value for '{}' must not be empty", setting.name()));
            }
            set_setting(conn, setting.storage_key(), value)?;
            println!("{} = {}", setting.name(), value);
        }
        _ => {}
    }
    Ok(())
}
