// SPDX-License-Identifier: Apache-2.0

//!
//! A compiler pipeline for regular languages
//!
//! The pipeline has three independent layers:
//! - a generic operator-precedence [parser] driven by a pluggable operator
//!   table, and an [evaluator] that runs the resulting postfix sequence
//!   over any value domain
//! - an [algebra] of finite-state recognizers (union, catenation, Kleene
//!   star, intersection, difference, complement) over the immutable
//!   [automaton](crate::automaton) model, with normalization through the
//!   [minimizer]
//! - a [decompiler] that reconstructs a textual regular expression from an
//!   automaton by state elimination
//!
//! The canonical dialects, regular expressions over automata and over
//! expression text as well as a small arithmetic language, live in
//! [tables].
//!
//! ```
//! use relang::evaluator::evaluate;
//! use relang::names::NameGenerator;
//! use relang::tables::extended_regular_expressions;
//!
//! let names = NameGenerator::new();
//! let table = extended_regular_expressions();
//! let recognizer = evaluate("ab*c", &table, &names)?.unwrap();
//! assert!(recognizer.accepts("abbbc")?);
//! assert!(!recognizer.accepts("ab")?);
//! # Ok::<(), relang::errors::Error>(())
//! ```
//!
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod aggregator;
pub mod algebra;
pub mod automaton;
pub mod decompiler;
pub mod errors;
pub mod evaluator;
pub mod minimizer;
pub mod names;
pub mod parser;
pub mod tables;

mod bfs_queues;
mod exprs;
