//! Cell formatters.
//!
//! A [`Formatter`] turns the [`Value`] a column holds for a row into the
//! text of that cell. It must return [`Value::Text`] for a one-line cell or a
//! [`Value::List`] of `Text` for a multi-line cell; the table engine rejects
//! anything else.
//!
//! The constructors here are the stock formatters. Any closure can be
//! wrapped with [`Formatter::new`].

use std::fmt;
use std::sync::Arc;

use crate::source::Value;

type FormatFn = dyn Fn(&Value) -> Value + Send + Sync;

/// Shared, cloneable formatting function attached to a row.
#[derive(Clone)]
pub struct Formatter {
    func: Arc<FormatFn>,
    name: &'static str,
}

impl Formatter {
    /// Wrap an arbitrary formatting closure
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Formatter {
            func: Arc::new(func),
            name: "custom",
        }
    }

    /// Numbers rounded to `decimals` places with thousands separators;
    /// text is LaTeX-escaped, lists become one line per element.
    pub fn fixed(decimals: usize) -> Self {
        Formatter {
            func: Arc::new(move |value: &Value| fixed_value(value, decimals)),
            name: "fixed",
        }
    }

    /// Whole numbers with thousands separators
    pub fn integer() -> Self {
        Formatter {
            name: "integer",
            ..Formatter::fixed(0)
        }
    }

    /// Estimate-over-standard-error layout: the first element of a list as a
    /// number, every later element in parentheses on its own line.
    pub fn stacked(decimals: usize) -> Self {
        Formatter {
            func: Arc::new(move |value: &Value| match value {
                Value::List(items) => Value::List(
                    items
                        .iter()
                        .enumerate()
                        .map(|(idx, item)| {
                            let text = scalar_text(item, decimals);
                            if idx == 0 || text.is_empty() {
                                Value::Text(text)
                            } else {
                                Value::Text(format!("({})", text))
                            }
                        })
                        .collect(),
                ),
                other => fixed_value(other, decimals),
            }),
            name: "stacked",
        }
    }

    /// Text and lists of text pass through untouched
    pub fn verbatim() -> Self {
        Formatter {
            func: Arc::new(|value: &Value| match value {
                Value::Text(_) | Value::List(_) => value.clone(),
                other => Value::Text(scalar_text(other, 3)),
            }),
            name: "verbatim",
        }
    }

    /// Apply the formatter
    pub fn apply(&self, value: &Value) -> Value {
        (self.func)(value)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::fixed(3)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter").field("name", &self.name).finish()
    }
}

fn fixed_value(value: &Value, decimals: usize) -> Value {
    match value {
        Value::List(items) => Value::List(
            items
                .iter()
                .map(|item| Value::Text(scalar_text(item, decimals)))
                .collect(),
        ),
        other => Value::Text(scalar_text(other, decimals)),
    }
}

fn scalar_text(value: &Value, decimals: usize) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Int(n) => group_thousands(&n.to_string()),
        Value::Float(x) => format_number(*x, decimals),
        Value::Text(text) => escape_latex(text),
        Value::List(items) => items
            .iter()
            .map(|item| scalar_text(item, decimals))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Round `x` to `decimals` places and insert `,` thousands separators.
///
/// Non-finite values render as empty strings.
pub fn format_number(x: f64, decimals: usize) -> String {
    if !x.is_finite() {
        return String::new();
    }
    let rendered = format!("{:.*}", decimals, x);
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };
    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

/// Escape the characters LaTeX treats specially in text mode.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}
