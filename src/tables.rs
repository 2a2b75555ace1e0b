// SPDX-License-Identifier: Apache-2.0

//!
//! Canonical operator tables
//!
//! Each table is a dialect the generic parser and evaluator can run:
//! [arithmetic] on integers, [formal_regular_expressions] and
//! [extended_regular_expressions] on automata, and [transpiler] on
//! expression text itself. The dialects differ only in configuration; the
//! engine underneath is the same.
//!

use crate::algebra::{
    catenation, empty_set, empty_string, literal, one_or_more, union, zero_or_more, zero_or_one,
};
use crate::automaton::Automaton;
use crate::errors::Error;
use crate::exprs::{alternate_expr, catenate_expr, times_expr, to_value_expr, zero_or_more_expr};
use crate::parser::OperatorTable;

///
/// Single-digit integer arithmetic with postfix factorial
///
/// The default operator is `*`, so `2(3+4)` multiplies.
///
pub fn arithmetic() -> OperatorTable<i64> {
    OperatorTable::<i64>::new()
        .infix('+', 1, |_, a, b| Ok(a + b))
        .infix('-', 1, |_, a, b| Ok(a - b))
        .infix('/', 2, |_, a, b| {
            a.checked_div(b).ok_or(Error::DivisionByZero)
        })
        .infix('*', 3, |_, a, b| Ok(a * b))
        .postfix('!', 4, |_, a| Ok((1..=a).product()))
        .default_operator('*')
        .to_value(|_, symbol| {
            symbol
                .to_digit(10)
                .map(i64::from)
                .ok_or(Error::NotAValue(symbol))
        })
}

///
/// The formal dialect: `∅`, `ε`, alternation `|`, catenation `→` (also
/// the default operator), and the Kleene star `*`
///
pub fn formal_regular_expressions() -> OperatorTable<Automaton> {
    OperatorTable::new()
        .atomic('\u{2205}', |names| Ok(empty_set(names)))
        .atomic('\u{03B5}', |names| Ok(empty_string(names)))
        .infix('|', 10, |names, a, b| union(names, &a, &b))
        .infix('\u{2192}', 20, |names, a, b| catenation(names, &a, &b))
        .postfix('*', 30, |names, a| zero_or_more(names, &a))
        .default_operator('\u{2192}')
        .to_value(|names, symbol| Ok(literal(names, symbol)))
}

///
/// The formal dialect extended with the common conveniences `?` and `+`
///
pub fn extended_regular_expressions() -> OperatorTable<Automaton> {
    formal_regular_expressions()
        .postfix('?', 30, |names, a| zero_or_one(names, &a))
        .postfix('+', 30, |names, a| one_or_more(names, &a))
}

///
/// The extended dialect over expression text: evaluating an expression
/// rewrites it into simplified formal notation
///
/// Includes the counted-repetition operator `⊗`, whose right operand must
/// be a numeral.
///
pub fn transpiler() -> OperatorTable<String> {
    OperatorTable::new()
        .atomic('\u{2205}', |_| Ok("\u{2205}".to_string()))
        .atomic('\u{03B5}', |_| Ok("\u{03B5}".to_string()))
        .infix('|', 10, |_, a, b| Ok(alternate_expr(&[a, b])))
        .infix('\u{2192}', 20, |_, a, b| Ok(catenate_expr(&[a, b])))
        .infix('\u{2297}', 25, |_, a, b| times_expr(&a, &b))
        .postfix('*', 30, |_, a| Ok(zero_or_more_expr(&a)))
        .postfix('?', 30, |_, a| Ok(alternate_expr(&["\u{03B5}".to_string(), a])))
        .postfix('+', 30, |_, a| {
            let starred = zero_or_more_expr(&a);
            Ok(catenate_expr(&[a, starred]))
        })
        .default_operator('\u{2192}')
        .to_value(|_, symbol| Ok(to_value_expr(symbol)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::names::NameGenerator;

    fn compile(table: &OperatorTable<Automaton>, expression: &str) -> Automaton {
        evaluate(expression, table, &NameGenerator::new())
            .unwrap()
            .unwrap()
    }

    fn transpile(expression: &str) -> String {
        evaluate(expression, &transpiler(), &NameGenerator::new())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn formal_dialect_compiles_recognizers() {
        let table = formal_regular_expressions();

        let binary = compile(&table, "0|1(0|1)*");
        for input in ["0", "1", "10", "11010011"] {
            assert!(binary.accepts(input).unwrap());
        }
        for input in ["", "01", "2"] {
            assert!(!binary.accepts(input).unwrap());
        }

        let nothing = compile(&table, "\u{2205}");
        assert!(!nothing.accepts("").unwrap());
        let just_empty = compile(&table, "\u{03B5}");
        assert!(just_empty.accepts("").unwrap());
        assert!(!just_empty.accepts("\u{03B5}").unwrap());
    }

    #[test]
    fn arithmetic_division() {
        let names = NameGenerator::from_seed(1);
        let table = arithmetic();
        assert_eq!(evaluate("8/2", &table, &names), Ok(Some(4)));
        // quotients truncate, and / binds tighter than +
        assert_eq!(evaluate("9/2+1", &table, &names), Ok(Some(5)));
        assert_eq!(evaluate("3/0", &table, &names), Err(Error::DivisionByZero));
    }

    #[test]
    fn empty_expression_produces_no_value() {
        let table = formal_regular_expressions();
        assert!(evaluate("", &table, &NameGenerator::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn escaped_operators_are_literals() {
        let table = formal_regular_expressions();
        let star = compile(&table, "`*");
        assert!(star.accepts("*").unwrap());
        assert!(!star.accepts("").unwrap());

        let empty_set_symbol = compile(&table, "`\u{2205}");
        assert!(empty_set_symbol.accepts("\u{2205}").unwrap());
        assert!(!empty_set_symbol.accepts("").unwrap());
    }

    #[test]
    fn extended_dialect_adds_conveniences() {
        let table = extended_regular_expressions();

        let abc = compile(&table, "ab*c");
        for input in ["ac", "abc", "abbbc"] {
            assert!(abc.accepts(input).unwrap());
        }
        for input in ["", "a", "ab", "abbb"] {
            assert!(!abc.accepts(input).unwrap());
        }

        let maybe = compile(&table, "ab?c");
        assert!(maybe.accepts("ac").unwrap());
        assert!(maybe.accepts("abc").unwrap());
        assert!(!maybe.accepts("abbc").unwrap());

        let some = compile(&table, "ab+c");
        assert!(some.accepts("abc").unwrap());
        assert!(some.accepts("abbc").unwrap());
        assert!(!some.accepts("ac").unwrap());
    }

    #[test]
    fn transpiler_rewrites_to_formal_notation() {
        assert_eq!(transpile("a|a"), "a");
        assert_eq!(transpile("a\u{2205}b"), "\u{2205}");
        assert_eq!(transpile("a?"), "\u{03B5}|a");
        assert_eq!(transpile("a+"), "a(a*)");
        assert_eq!(transpile("a\u{2297}3"), "aaa");
        assert_eq!(
            evaluate("a\u{2297}x", &transpiler(), &NameGenerator::new()),
            Err(Error::ArityParseFailure("x".to_string()))
        );
        assert_eq!(transpile("`\u{2205}"), "`\u{2205}");
    }

    #[test]
    fn transpiled_text_compiles_to_the_same_language() {
        let table = extended_regular_expressions();
        for source in ["ab*c", "a?b+", "0|1(0|1)*"] {
            let rewritten = transpile(source);
            let direct = compile(&table, source);
            let via_text = compile(&table, &rewritten);
            for input in ["", "a", "b", "ab", "abc", "ac", "abbc", "0", "10", "aa"] {
                assert_eq!(
                    direct.accepts(input).unwrap(),
                    via_text.accepts(input).unwrap(),
                    "{:?} and its rewrite {:?} disagree on {:?}",
                    source,
                    rewritten,
                    input
                );
            }
        }
    }
}
