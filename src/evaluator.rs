// SPDX-License-Identifier: Apache-2.0

//!
//! Generic postfix evaluation
//!
//! A postfix token sequence is run on a value stack: literal tokens are
//! resolved through the table's `to_value` and pushed, operator tokens pop
//! their declared arity and push the result of the semantic function. The
//! evaluator knows nothing about the value domain; the [OperatorTable]
//! supplies all of the semantics.
//!

use crate::errors::Error;
use crate::names::NameGenerator;
use crate::parser::{shunting_yard, OperatorTable, Token};

///
/// Run a postfix token sequence on a value stack
///
/// An empty sequence produces `Ok(None)`. A sequence leaving more than one
/// value on the stack fails with [Error::UnconsumedValues]; arguments are
/// handed to the semantic function in their left-to-right source order.
///
pub fn run_postfix<V>(
    tokens: &[Token],
    table: &OperatorTable<V>,
    names: &NameGenerator,
) -> Result<Option<V>, Error> {
    let mut stack: Vec<V> = Vec::new();
    for token in tokens {
        match token {
            Token::Value(literal) => {
                stack.push(table.value_of(names, *literal)?);
            }
            Token::Operator(symbol) => {
                let operator = table
                    .operator(symbol)
                    .ok_or_else(|| Error::UnknownOperator(symbol.clone()))?;
                if stack.len() < operator.arity() {
                    return Err(Error::StackUnderflow(symbol.clone()));
                }
                let arguments = stack.split_off(stack.len() - operator.arity());
                stack.push(operator.apply(names, arguments)?);
            }
        }
    }
    match stack.len() {
        0 | 1 => Ok(stack.pop()),
        n => Err(Error::UnconsumedValues(n)),
    }
}

///
/// Parse an infix expression and evaluate it in one step
///
pub fn evaluate<V>(
    expression: &str,
    table: &OperatorTable<V>,
    names: &NameGenerator,
) -> Result<Option<V>, Error> {
    let tokens = shunting_yard(expression, table)?;
    run_postfix(&tokens, table, names)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tables::arithmetic;

    fn calculate(expression: &str) -> Result<Option<i64>, Error> {
        evaluate(expression, &arithmetic(), &NameGenerator::from_seed(1))
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(calculate(""), Ok(None));
        assert_eq!(calculate("3"), Ok(Some(3)));
        assert_eq!(calculate("2+3"), Ok(Some(5)));
        assert_eq!(calculate("4!"), Ok(Some(24)));
        assert_eq!(calculate("3*2+4!"), Ok(Some(30)));
        assert_eq!(calculate("(3*2+4)!"), Ok(Some(3628800)));
    }

    #[test]
    fn implicit_catenation_multiplies() {
        assert_eq!(calculate("2(3+4)5"), Ok(Some(70)));
        assert_eq!(calculate("3!2"), Ok(Some(12)));
    }

    #[test]
    fn non_digit_literal_is_rejected() {
        assert_eq!(calculate("2+x"), Err(Error::NotAValue('x')));
    }

    #[test]
    fn malformed_postfix_sequences_are_rejected() {
        let table = arithmetic();
        let names = NameGenerator::from_seed(1);
        assert_eq!(
            run_postfix(
                &[Token::Value('2'), Token::Operator("+".to_string())],
                &table,
                &names
            ),
            Err(Error::StackUnderflow("+".to_string()))
        );
        assert_eq!(
            run_postfix(&[Token::Value('2'), Token::Value('3')], &table, &names),
            Err(Error::UnconsumedValues(2))
        );
        assert_eq!(
            run_postfix(&[Token::Operator("?".to_string())], &table, &names),
            Err(Error::UnknownOperator("?".to_string()))
        );
    }

    #[test]
    fn literals_without_to_value_are_rejected() {
        let bare: OperatorTable<i64> = OperatorTable::new().default_operator('+');
        let names = NameGenerator::from_seed(1);
        assert_eq!(evaluate("7", &bare, &names), Err(Error::NotAValue('7')));
    }
}
