// SPDX-License-Identifier: Apache-2.0

//!
//! Simplifying construction of regular-expression text
//!
//! These helpers build expression strings while applying the algebraic
//! identities that keep decompiled expressions readable: duplicates and ∅
//! vanish from alternations, ∅ short-circuits and ε vanishes from
//! catenations, and the star of ∅ or ε is ε.
//!

use std::collections::HashSet;

use crate::errors::Error;

/// Symbols with a meaning of their own in expression text
pub(crate) const RESERVED: &str = "\u{2205}\u{03B5}|\u{2192}*()`";

/// A symbol as a literal: reserved symbols get the escape prefix
pub(crate) fn to_value_expr(symbol: char) -> String {
    if RESERVED.contains(symbol) {
        format!("`{}", symbol)
    } else {
        symbol.to_string()
    }
}

// true when the whole of `chars` is one (...) group
fn outer_parentheses_match(chars: &[char]) -> bool {
    let mut depth = 0i32;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '`' => i += 1,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i + 1 < chars.len() {
                    return false;
                }
            }
            _ => {}
        }
        i += 1;
    }
    depth == 0
}

///
/// Wrap an expression in parentheses unless it is already atomic: a single
/// symbol, an escaped symbol, or one parenthesized group
///
pub(crate) fn parenthesize(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let atomic = match chars.len() {
        0 | 1 => true,
        2 => chars[0] == '`',
        _ => {
            chars[0] == '(' && chars[chars.len() - 1] == ')' && outer_parentheses_match(&chars)
        }
    };
    if atomic {
        expression.to_string()
    } else {
        format!("({})", expression)
    }
}

/// Alternation of expressions, duplicates and ∅ removed
pub(crate) fn alternate_expr(expressions: &[String]) -> String {
    let mut seen = HashSet::new();
    let alternatives: Vec<&String> = expressions
        .iter()
        .filter(|e| e.as_str() != "\u{2205}" && seen.insert(e.as_str().to_string()))
        .collect();
    match alternatives.len() {
        0 => "\u{2205}".to_string(),
        1 => alternatives[0].clone(),
        _ => alternatives
            .iter()
            .map(|e| parenthesize(e))
            .collect::<Vec<_>>()
            .join("|"),
    }
}

/// Catenation of expressions: ∅ absorbs everything, ε drops out
pub(crate) fn catenate_expr(expressions: &[String]) -> String {
    if expressions.iter().any(|e| e == "\u{2205}") {
        return "\u{2205}".to_string();
    }
    let material: Vec<&String> = expressions
        .iter()
        .filter(|e| e.as_str() != "\u{03B5}")
        .collect();
    match material.len() {
        0 => "\u{03B5}".to_string(),
        1 => material[0].clone(),
        _ => material.iter().map(|e| parenthesize(e)).collect(),
    }
}

/// Kleene star of an expression; the star of ∅ or ε is ε
pub(crate) fn zero_or_more_expr(expression: &str) -> String {
    if expression == "\u{2205}" || expression == "\u{03B5}" {
        "\u{03B5}".to_string()
    } else {
        format!("{}*", parenthesize(expression))
    }
}

/// `expression` catenated with itself `count` times, `count` given as text
pub(crate) fn times_expr(expression: &str, count: &str) -> Result<String, Error> {
    let n: usize = count
        .trim()
        .parse()
        .map_err(|_| Error::ArityParseFailure(count.to_string()))?;
    let copies: Vec<String> = std::iter::repeat(expression.to_string()).take(n).collect();
    Ok(catenate_expr(&copies))
}
