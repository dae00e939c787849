// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Four-function keypad calculator with chained (left-to-right) evaluation.
//!
//! `2 + 3 × 4 =` yields `20`, not `14`: every operator press folds the
//! entered value into the accumulator using the previously pending operator.

use crate::error::ShopError;
use crate::models::{TransactionDraft, TxKind};
use crate::store::Ledger;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Pending "=" keeps the right-hand operand.
    Equals,
}

impl Operator {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
            Operator::Equals => b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Equals => "=",
        }
    }
}

impl FromStr for Operator {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "×" | "*" | "x" | "X" => Ok(Operator::Multiply),
            "÷" | "/" => Ok(Operator::Divide),
            "=" => Ok(Operator::Equals),
            other => Err(ShopError::InvalidOperator(other.to_string())),
        }
    }
}

/// A single keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Operator(Operator),
    Evaluate,
    Clear,
}

impl Key {
    /// Maps a keypad character. `=` is the evaluate button here, not the
    /// `=` operator.
    pub fn from_char(c: char) -> Result<Key, ShopError> {
        match c {
            '0'..='9' => Ok(Key::Digit(c)),
            '.' => Ok(Key::Point),
            '=' => Ok(Key::Evaluate),
            'C' | 'c' => Ok(Key::Clear),
            other => Ok(Key::Operator(other.to_string().parse()?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    awaiting_fresh_digit: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator {
            display: "0".to_string(),
            accumulator: None,
            pending: None,
            awaiting_fresh_digit: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    pub fn is_awaiting_fresh_digit(&self) -> bool {
        self.awaiting_fresh_digit
    }

    /// Numeric value of the display, using the leading numeric prefix.
    pub fn value(&self) -> f64 {
        parse_number(&self.display)
    }

    pub fn input_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit(), "not a digit: {digit}");
        self.enter(digit);
    }

    /// Appends `.` under the digit rule. Repeated points are not rejected.
    pub fn input_decimal_point(&mut self) {
        self.enter('.');
    }

    fn enter(&mut self, c: char) {
        if self.awaiting_fresh_digit {
            self.display = c.to_string();
            self.awaiting_fresh_digit = false;
        } else if self.display == "0" {
            self.display = c.to_string();
        } else {
            self.display.push(c);
        }
    }

    pub fn input_operator(&mut self, op: Operator) {
        let input = self.value();
        match (self.accumulator, self.pending) {
            (None, _) => self.accumulator = Some(input),
            (Some(acc), Some(pending)) => {
                let result = pending.apply(acc, input);
                self.display = format_number(result);
                self.accumulator = Some(result);
            }
            (Some(_), None) => {}
        }
        self.pending = Some(op);
        self.awaiting_fresh_digit = true;
    }

    pub fn evaluate(&mut self) {
        if let (Some(acc), Some(pending)) = (self.accumulator, self.pending) {
            let result = pending.apply(acc, self.value());
            self.display = format_number(result);
            self.accumulator = None;
            self.pending = None;
            self.awaiting_fresh_digit = true;
        }
    }

    pub fn clear(&mut self) {
        *self = Calculator::default();
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Point => self.input_decimal_point(),
            Key::Operator(op) => self.input_operator(op),
            Key::Evaluate => self.evaluate(),
            Key::Clear => self.clear(),
        }
    }

    /// Feeds a keypad string such as `"12+3×2="`. Whitespace is skipped.
    pub fn run_keys(&mut self, keys: &str) -> Result<(), ShopError> {
        for c in keys.chars().filter(|c| !c.is_whitespace()) {
            self.press(Key::from_char(c)?);
        }
        debug!(display = %self.display, "keys applied");
        Ok(())
    }

    /// Records the displayed value as a transaction of `kind`.
    ///
    /// Returns `Ok(None)` without touching the ledger when the display is
    /// not a finite positive number. The calculator keeps its state.
    pub fn commit<L: Ledger>(&self, kind: TxKind, ledger: &mut L) -> Result<Option<i64>, ShopError> {
        let name = match kind {
            TxKind::Income => "Calculator income",
            TxKind::Expense => "Calculator expense",
        };
        self.commit_as(kind, name, ledger)
    }

    pub fn commit_as<L: Ledger>(
        &self,
        kind: TxKind,
        name: &str,
        ledger: &mut L,
    ) -> Result<Option<i64>, ShopError> {
        let value = self.value();
        if !value.is_finite() || value <= 0.0 {
            debug!(display = %self.display, "commit declined");
            return Ok(None);
        }
        let amount = match Decimal::try_from(value) {
            Ok(amount) if amount > Decimal::ZERO => amount,
            _ => {
                debug!(display = %self.display, "commit declined, amount not representable");
                return Ok(None);
            }
        };
        let now = chrono::Local::now();
        let id = ledger.record(TransactionDraft {
            name: name.to_string(),
            amount,
            date: now.date_naive(),
            time: now.format("%H:%M").to_string(),
            kind,
            audio: None,
            photo: None,
        })?;
        info!(id, %amount, %kind, "calculator value committed");
        Ok(Some(id))
    }
}

/// Renders a result the way the keypad shows it: integral values without a
/// fraction, non-finite values as `Infinity`, `-Infinity` or `NaN`.
/// Magnitudes from 1e21 up or below 1e-6 switch to exponent form (`1e+21`,
/// `1.5e-7`).
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let s = if v > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1e21 || v.abs() < 1e-6 {
        let exp = format!("{:e}", v);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        }
    } else {
        format!("{}", v)
    }
}

/// Parses the longest leading decimal number in `text`; `NaN` when there is
/// none. `"1.2.3"` reads as `1.2`, `".5"` as `0.5`.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;
    for (i, c) in rest.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_point => {
                seen_point = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return f64::NAN;
    }
    end += exponent_len(&rest[end..]);
    rest[..end]
        .parse::<f64>()
        .map(|v| sign * v)
        .unwrap_or(f64::NAN)
}

/// Length of an `e[+-]digits` suffix at the start of `s`, 0 when there is none.
fn exponent_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 { 0 } else { 1 + sign + digits }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct VecLedger(Vec<TransactionDraft>);

    impl Ledger for VecLedger {
        fn record(&mut self, draft: TransactionDraft) -> Result<i64, ShopError> {
            self.0.push(draft);
            Ok(self.0.len() as i64)
        }
    }

    fn run(keys: &str) -> Calculator {
        let mut c = Calculator::new();
        c.run_keys(keys).unwrap();
        c
    }

    #[test]
    fn adds_two_operands() {
        let mut c = Calculator::new();
        c.clear();
        c.input_digit('5');
        c.input_operator(Operator::Add);
        c.input_digit('3');
        c.evaluate();
        assert_eq!(c.display(), "8");
        assert_eq!(c.accumulator(), None);
        assert_eq!(c.pending(), None);
        assert!(c.is_awaiting_fresh_digit());
    }

    #[test]
    fn divide_by_zero_shows_infinity() {
        let mut c = Calculator::new();
        c.input_digit('6');
        c.input_operator(Operator::Divide);
        c.input_digit('0');
        c.evaluate();
        assert_eq!(c.display(), "Infinity");
        assert!(c.value().is_infinite());
    }

    #[test]
    fn zero_by_zero_is_nan() {
        assert_eq!(run("0÷0=").display(), "NaN");
    }

    #[test]
    fn chains_left_to_right() {
        let c = run("2+3×4=");
        assert_eq!(c.display(), "20");
    }

    #[test]
    fn operator_press_shows_running_total() {
        let c = run("9-4+");
        assert_eq!(c.display(), "5");
        assert_eq!(c.accumulator(), Some(5.0));
        assert_eq!(c.pending(), Some(Operator::Add));
    }

    #[test]
    fn equals_operator_keeps_right_operand() {
        let mut c = Calculator::new();
        c.input_digit('7');
        c.input_operator(Operator::Equals);
        c.input_digit('2');
        c.input_operator(Operator::Add);
        assert_eq!(c.display(), "2");
        assert_eq!(c.accumulator(), Some(2.0));
    }

    #[test]
    fn leading_zero_is_replaced() {
        let c = run("007");
        assert_eq!(c.display(), "7");
    }

    #[test]
    fn digit_after_result_starts_fresh() {
        let c = run("5+3=4");
        assert_eq!(c.display(), "4");
    }

    #[test]
    fn evaluate_without_pending_is_noop() {
        let c = run("12=");
        assert_eq!(c.display(), "12");
        assert!(!c.is_awaiting_fresh_digit());
    }

    #[test]
    fn decimal_input_follows_digit_rule() {
        assert_eq!(run(".5").display(), ".5");
        assert_eq!(run(".5").value(), 0.5);
        assert_eq!(run("1.5+1.25=").display(), "2.75");
    }

    #[test]
    fn repeated_points_are_kept_and_read_as_prefix() {
        let c = run("1.2.3");
        assert_eq!(c.display(), "1.2.3");
        assert_eq!(c.value(), 1.2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut c = run("4×");
        c.clear();
        assert_eq!(c, Calculator::new());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut c = Calculator::new();
        assert_eq!(
            c.run_keys("4%2"),
            Err(ShopError::InvalidOperator("%".into()))
        );
    }

    #[test]
    fn commit_rejects_zero_and_non_finite() {
        let mut ledger = VecLedger::default();
        assert_eq!(Calculator::new().commit(TxKind::Income, &mut ledger), Ok(None));
        assert_eq!(run("6÷0=").commit(TxKind::Income, &mut ledger), Ok(None));
        assert_eq!(run("3-5=").commit(TxKind::Expense, &mut ledger), Ok(None));
        assert!(ledger.0.is_empty());
    }

    #[test]
    fn commit_declines_value_that_rounds_to_zero() {
        let mut ledger = VecLedger::default();
        let c = run("0.00000000000000000000000000000001");
        assert_eq!(c.commit(TxKind::Income, &mut ledger), Ok(None));
        assert!(ledger.0.is_empty());
    }

    #[test]
    fn commit_declines_value_beyond_decimal_range() {
        let mut ledger = VecLedger::default();
        let c = run("99999999999999999999999999999999");
        assert_eq!(c.commit(TxKind::Expense, &mut ledger), Ok(None));
        assert!(ledger.0.is_empty());
    }

    #[test]
    fn commit_records_positive_value_and_keeps_state() {
        let mut ledger = VecLedger::default();
        let c = run("42.5");
        let id = c.commit(TxKind::Income, &mut ledger).unwrap();
        assert_eq!(id, Some(1));
        assert_eq!(ledger.0.len(), 1);
        assert_eq!(ledger.0[0].amount, Decimal::new(425, 1));
        assert_eq!(ledger.0[0].kind, TxKind::Income);
        assert_eq!(c.display(), "42.5");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert!(parse_number(".").is_nan());
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_number("-3"), -3.0);
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(parse_number("1e+21"), 1e21);
        assert_eq!(parse_number("1.5e-7"), 1.5e-7);
        assert_eq!(parse_number("2e"), 2.0);
        assert_eq!(parse_number("2e+"), 2.0);

        let c = run("100000000000×100000000000=");
        assert_eq!(c.display(), "1e+22");
    }
}
