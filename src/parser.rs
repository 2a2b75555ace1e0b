// SPDX-License-Identifier: Apache-2.0

//!
//! Operator tables and the infix-to-postfix parser
//!
//! An [OperatorTable] describes a surface dialect: which symbols are
//! operators, their fixity, precedence, and arity, and how literals become
//! values. The table is plain configuration data; the same parser and
//! evaluator serve arithmetic, regular expressions, and anything else that
//! fits the operator-precedence shape.
//!
//! [shunting_yard] rewrites an infix expression into a postfix token
//! sequence. The parser itself never touches the value domain `V`; only
//! the evaluator applies semantic functions.
//!
//! Two conveniences beyond textbook shunting yard:
//! - implicit catenation: two adjacent values (or a value followed by an
//!   opening parenthesis, a prefix operator, or an atomic operator) have
//!   the table's default operator inserted between them
//! - an escape symbol (backquote by default) forces the next symbol to be
//!   read as a literal value even if it names an operator
//!

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Debug;
use std::rc::Rc;

use crate::errors::Error;
use crate::names::NameGenerator;

///
/// How an operator combines with its operands
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    /// A self-contained symbol taking no operands, such as `∅`
    Atomic,
    /// Written before its single operand
    Prefix,
    /// Written between its two operands
    Infix,
    /// Written after its single operand
    Postfix,
}

type Semantics<V> = Rc<dyn Fn(&NameGenerator, Vec<V>) -> Result<V, Error>>;

///
/// One operator of a dialect: surface symbol, fixity, precedence, arity,
/// and the semantic function applied by the evaluator
///
pub struct Operator<V> {
    symbol: String,
    fixity: Fixity,
    precedence: Option<u32>,
    arity: usize,
    apply: Semantics<V>,
}

impl<V> Operator<V> {
    /// Surface symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fixity
    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    /// Precedence. Atomic operators have none.
    pub fn precedence(&self) -> Option<u32> {
        self.precedence
    }

    /// Number of values consumed from the evaluation stack
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Apply the semantic function to exactly [Operator::arity] arguments
    pub fn apply(&self, names: &NameGenerator, arguments: Vec<V>) -> Result<V, Error> {
        if arguments.len() != self.arity {
            return Err(Error::StackUnderflow(self.symbol.clone()));
        }
        (self.apply)(names, arguments)
    }
}

impl<V> Debug for Operator<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("fixity", &self.fixity)
            .field("precedence", &self.precedence)
            .field("arity", &self.arity)
            .finish()
    }
}

type ToValue<V> = Rc<dyn Fn(&NameGenerator, char) -> Result<V, Error>>;

///
/// A surface dialect: operators plus literal handling
///
/// Built with a fluent chain:
/// ```
/// use relang::parser::OperatorTable;
///
/// let sums: OperatorTable<i64> = OperatorTable::new()
///     .infix('+', 1, |_, a, b| Ok(a + b))
///     .to_value(|_, c| {
///         c.to_digit(10)
///             .map(i64::from)
///             .ok_or(relang::errors::Error::NotAValue(c))
///     });
/// ```
///
pub struct OperatorTable<V> {
    operators: BTreeMap<String, Operator<V>>,
    default_operator: Option<char>,
    escape_symbol: char,
    to_value: Option<ToValue<V>>,
}

impl<V> OperatorTable<V> {
    /// Create an empty table with the default escape symbol `` ` ``
    pub fn new() -> Self {
        OperatorTable {
            operators: BTreeMap::new(),
            default_operator: None,
            escape_symbol: '`',
            to_value: None,
        }
    }

    fn operator_entry(
        mut self,
        symbol: char,
        fixity: Fixity,
        precedence: Option<u32>,
        arity: usize,
        apply: Semantics<V>,
    ) -> Self {
        self.operators.insert(
            symbol.to_string(),
            Operator {
                symbol: symbol.to_string(),
                fixity,
                precedence,
                arity,
                apply,
            },
        );
        self
    }

    /// Add an atomic operator, a nullary symbol such as `∅`
    pub fn atomic(
        self,
        symbol: char,
        apply: impl Fn(&NameGenerator) -> Result<V, Error> + 'static,
    ) -> Self {
        self.operator_entry(
            symbol,
            Fixity::Atomic,
            None,
            0,
            Rc::new(move |names, _| apply(names)),
        )
    }

    /// Add a prefix operator
    pub fn prefix(
        self,
        symbol: char,
        precedence: u32,
        apply: impl Fn(&NameGenerator, V) -> Result<V, Error> + 'static,
    ) -> Self {
        let symbol_text = symbol.to_string();
        self.operator_entry(
            symbol,
            Fixity::Prefix,
            Some(precedence),
            1,
            Rc::new(move |names, mut arguments| match arguments.pop() {
                Some(a) => apply(names, a),
                None => Err(Error::StackUnderflow(symbol_text.clone())),
            }),
        )
    }

    /// Add an infix operator
    pub fn infix(
        self,
        symbol: char,
        precedence: u32,
        apply: impl Fn(&NameGenerator, V, V) -> Result<V, Error> + 'static,
    ) -> Self {
        let symbol_text = symbol.to_string();
        self.operator_entry(
            symbol,
            Fixity::Infix,
            Some(precedence),
            2,
            Rc::new(move |names, mut arguments| {
                match (arguments.pop(), arguments.pop()) {
                    // popped right-to-left
                    (Some(b), Some(a)) => apply(names, a, b),
                    _ => Err(Error::StackUnderflow(symbol_text.clone())),
                }
            }),
        )
    }

    /// Add a postfix operator
    pub fn postfix(
        self,
        symbol: char,
        precedence: u32,
        apply: impl Fn(&NameGenerator, V) -> Result<V, Error> + 'static,
    ) -> Self {
        let symbol_text = symbol.to_string();
        self.operator_entry(
            symbol,
            Fixity::Postfix,
            Some(precedence),
            1,
            Rc::new(move |names, mut arguments| match arguments.pop() {
                Some(a) => apply(names, a),
                None => Err(Error::StackUnderflow(symbol_text.clone())),
            }),
        )
    }

    /// Declare the operator inserted for implicit catenation
    pub fn default_operator(mut self, symbol: char) -> Self {
        self.default_operator = Some(symbol);
        self
    }

    /// Replace the escape symbol
    pub fn escape_symbol(mut self, symbol: char) -> Self {
        self.escape_symbol = symbol;
        self
    }

    /// Declare how literal symbols become domain values
    pub fn to_value(
        mut self,
        to_value: impl Fn(&NameGenerator, char) -> Result<V, Error> + 'static,
    ) -> Self {
        self.to_value = Some(Rc::new(to_value));
        self
    }

    /// Look up an operator by its surface symbol
    pub fn operator(&self, symbol: &str) -> Option<&Operator<V>> {
        self.operators.get(symbol)
    }

    /// Turn a literal symbol into a domain value
    pub fn value_of(&self, names: &NameGenerator, literal: char) -> Result<V, Error> {
        match &self.to_value {
            Some(to_value) => to_value(names, literal),
            None => Err(Error::NotAValue(literal)),
        }
    }

    fn operator_at(&self, symbol: char) -> Option<&Operator<V>> {
        self.operators.get(symbol.to_string().as_str())
    }

    fn implicit_catenation(&self) -> Result<char, Error> {
        self.default_operator.ok_or(Error::NoDefaultOperator)
    }
}

impl<V> Debug for OperatorTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorTable")
            .field("operators", &self.operators)
            .field("default_operator", &self.default_operator)
            .field("escape_symbol", &self.escape_symbol)
            .field("to_value", &self.to_value.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<V> Default for OperatorTable<V> {
    fn default() -> Self {
        OperatorTable::new()
    }
}

///
/// One element of a postfix sequence
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal symbol, resolved through the table's `to_value`
    Value(char),
    /// An operator, named by its surface symbol
    Operator(String),
}

enum StackItem {
    Paren,
    Operator(String, u32),
}

fn push_operator(stack: &mut Vec<StackItem>, output: &mut Vec<Token>, symbol: &str, precedence: u32) {
    // operators of strictly higher precedence bind first
    while let Some(StackItem::Operator(top, top_precedence)) = stack.last() {
        if precedence < *top_precedence {
            output.push(Token::Operator(top.clone()));
            stack.pop();
        } else {
            break;
        }
    }
    stack.push(StackItem::Operator(symbol.to_string(), precedence));
}

///
/// Rewrite an infix expression into a postfix token sequence
///
/// Symbols not in the table are values. Implicit catenation is made
/// explicit by pushing the default operator back onto the input in front
/// of the second value, so the rewritten pair passes through the ordinary
/// operator handling.
///
pub fn shunting_yard<V>(expression: &str, table: &OperatorTable<V>) -> Result<Vec<Token>, Error> {
    let mut input: VecDeque<char> = expression.chars().collect();
    let mut stack: Vec<StackItem> = Vec::new();
    let mut output: Vec<Token> = Vec::new();
    let mut awaiting_value = true;

    while let Some(symbol) = input.pop_front() {
        if symbol == table.escape_symbol {
            match input.pop_front() {
                None => return Err(Error::DanglingEscape(symbol)),
                Some(escaped) if awaiting_value => {
                    output.push(Token::Value(escaped));
                    awaiting_value = false;
                }
                Some(escaped) => {
                    input.push_front(escaped);
                    input.push_front(symbol);
                    input.push_front(table.implicit_catenation()?);
                }
            }
        } else if symbol == '(' {
            if awaiting_value {
                stack.push(StackItem::Paren);
            } else {
                input.push_front(symbol);
                input.push_front(table.implicit_catenation()?);
            }
        } else if symbol == ')' {
            loop {
                match stack.pop() {
                    Some(StackItem::Operator(top, _)) => output.push(Token::Operator(top)),
                    Some(StackItem::Paren) => break,
                    None => return Err(Error::UnbalancedParentheses),
                }
            }
            awaiting_value = false;
        } else {
            match table.operator_at(symbol) {
                Some(op) if op.fixity == Fixity::Atomic => {
                    if awaiting_value {
                        output.push(Token::Operator(op.symbol.clone()));
                        awaiting_value = false;
                    } else {
                        input.push_front(symbol);
                        input.push_front(table.implicit_catenation()?);
                    }
                }
                Some(op) if op.fixity == Fixity::Prefix && !awaiting_value => {
                    input.push_front(symbol);
                    input.push_front(table.implicit_catenation()?);
                }
                Some(op) => {
                    let precedence = op.precedence.unwrap_or(0);
                    push_operator(&mut stack, &mut output, &op.symbol, precedence);
                    awaiting_value = op.fixity != Fixity::Postfix;
                }
                None => {
                    if awaiting_value {
                        output.push(Token::Value(symbol));
                        awaiting_value = false;
                    } else {
                        input.push_front(symbol);
                        input.push_front(table.implicit_catenation()?);
                    }
                }
            }
        }
    }

    while let Some(item) = stack.pop() {
        match item {
            StackItem::Paren => return Err(Error::UnbalancedParentheses),
            StackItem::Operator(top, _) => output.push(Token::Operator(top)),
        }
    }
    Ok(output)
}
