//! Rewrites user notation into a token stream the evaluator can reduce
//! directly, without executing anything.
//!
//! Substitution runs over whole tokens, so a variable named `x` never touches
//! the `x` inside `exp`, and `asin` can never be half-rewritten as `a` + `sin`.

use crate::equation_engine::{is_function_name, tokenize, Token};
use crate::error::{CalcError, CalcResult, ParenIssue};
use crate::mathlib::constants::PHI;
use crate::settings::ParenPolicy;
use std::collections::BTreeMap;
use std::fmt;

/// Session values visible to expressions: stored variables `A`–`Z` and `ANS`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    pub variables: BTreeMap<char, f64>,
    pub last_answer: Option<f64>,
}

impl SymbolTable {
    pub const fn new() -> Self {
        Self {
            variables: BTreeMap::new(),
            last_answer: None,
        }
    }

    fn lookup_variable(&self, name: &str) -> Option<f64> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => self.variables.get(&c).copied(),
            _ => None,
        }
    }
}

/// A free variable bound to a sample value.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub variable: &'a str,
    pub value: f64,
}

/// Result of normalization. Always balanced.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedExpr {
    tokens: Vec<Token>,
    repaired_parens: usize,
}

impl NormalizedExpr {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Closing parentheses appended by the repair pass.
    pub fn repaired_parens(&self) -> usize {
        self.repaired_parens
    }
}

impl fmt::Display for NormalizedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&Token> = None;
        for token in &self.tokens {
            let word = |t: &Token| matches!(t, Token::Number(_) | Token::Identifier(_));
            if previous.is_some_and(word) && word(token) {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
            previous = Some(token);
        }
        Ok(())
    }
}

/// Scans parenthesis depth over the raw text.
///
/// Returns the number of unclosed `(`; fails as soon as a `)` has no partner.
pub fn check_balance(text: &str) -> CalcResult<usize> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(CalcError::UnmatchedParen(ParenIssue::ExtraClosing))?;
            }
            _ => {}
        }
    }
    Ok(depth)
}

pub fn normalize(
    text: &str,
    symbols: &SymbolTable,
    binding: Option<Binding<'_>>,
    policy: ParenPolicy,
) -> CalcResult<NormalizedExpr> {
    let unclosed = check_balance(text)?;
    if unclosed > 0 && policy == ParenPolicy::Strict {
        return Err(CalcError::UnmatchedParen(ParenIssue::MissingClosing));
    }

    let raw = tokenize(text)?;
    let mut tokens = Vec::with_capacity(raw.len() + unclosed);

    for (idx, token) in raw.iter().enumerate() {
        let Token::Identifier(name) = token else {
            tokens.push(token.clone());
            continue;
        };

        // The free variable goes first so a bound value is never mistaken
        // for a constant or a function name.
        if let Some(b) = binding.filter(|b| b.variable == name.as_str()) {
            tokens.extend([Token::LParen, Token::Number(b.value), Token::RParen]);
            continue;
        }

        if name == "ANS" {
            push_value(&mut tokens, symbols.last_answer.unwrap_or(0.0));
            continue;
        }

        if let Some(value) = symbols.lookup_variable(name) {
            push_value(&mut tokens, value);
            continue;
        }

        let followed_by_call = matches!(raw.get(idx + 1), Some(Token::LParen));
        if followed_by_call && is_function_name(name) {
            tokens.push(Token::Identifier(name.to_ascii_lowercase()));
            continue;
        }

        match name.as_str() {
            "π" | "pi" | "PI" | "Pi" => tokens.push(Token::Number(std::f64::consts::PI)),
            "e" => tokens.push(Token::Number(std::f64::consts::E)),
            "φ" | "phi" => tokens.push(Token::Number(PHI)),
            _ => tokens.push(token.clone()),
        }
    }

    let opens = tokens.iter().filter(|t| **t == Token::LParen).count();
    let closes = tokens.iter().filter(|t| **t == Token::RParen).count();
    let repaired_parens = opens.saturating_sub(closes);
    tokens.extend(std::iter::repeat(Token::RParen).take(repaired_parens));

    Ok(NormalizedExpr {
        tokens,
        repaired_parens,
    })
}

/// Negative values are parenthesized so the rendered text keeps the sign
/// attached: `ANS^2` with `ANS = -3` prints as `(-3)^2`.
fn push_value(tokens: &mut Vec<Token>, value: f64) {
    if value < 0.0 {
        tokens.extend([Token::LParen, Token::Number(value), Token::RParen]);
    } else {
        tokens.push(Token::Number(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::settings::AngleMode;

    fn norm(text: &str) -> NormalizedExpr {
        normalize(text, &SymbolTable::new(), None, ParenPolicy::Repair).expect("normalizes")
    }

    #[test]
    fn balance_check_reports_extra_closing() {
        assert_eq!(check_balance("(1+2)").unwrap(), 0);
        assert_eq!(check_balance("sin(cos(1").unwrap(), 2);
        assert_eq!(
            check_balance("1+2)").unwrap_err(),
            CalcError::UnmatchedParen(ParenIssue::ExtraClosing)
        );
        assert_eq!(
            check_balance(")(").unwrap_err(),
            CalcError::UnmatchedParen(ParenIssue::ExtraClosing)
        );
    }

    #[test]
    fn repair_appends_missing_closers() {
        let n = norm("sin(x");
        assert_eq!(n.repaired_parens(), 1);
        assert_eq!(n.to_string(), "sin(x)");
        assert_eq!(check_balance(&n.to_string()).unwrap(), 0);
    }

    #[test]
    fn strict_policy_rejects_missing_closers() {
        let err = normalize("(1+2", &SymbolTable::new(), None, ParenPolicy::Strict)
            .expect_err("strict");
        assert_eq!(err, CalcError::UnmatchedParen(ParenIssue::MissingClosing));
    }

    #[test]
    fn binds_free_variable_as_parenthesized_value() {
        let n = normalize(
            "x^2+exp(x)",
            &SymbolTable::new(),
            Some(Binding {
                variable: "x",
                value: -2.0,
            }),
            ParenPolicy::Repair,
        )
        .expect("normalizes");
        assert_eq!(n.to_string(), "(-2)^2+exp((-2))");
    }

    #[test]
    fn substitutes_answer_and_stored_variables() {
        let mut symbols = SymbolTable::new();
        symbols.last_answer = Some(4.0);
        symbols.variables.insert('A', 1.5);
        let n = normalize("ANS*A+B", &symbols, None, ParenPolicy::Repair).expect("normalizes");
        assert_eq!(n.to_string(), "4*1.5+B");

        let fresh = norm("ANS+1");
        assert_eq!(fresh.to_string(), "0+1");
    }

    #[test]
    fn negative_substitutions_keep_their_sign_when_rendered() {
        let mut symbols = SymbolTable::new();
        symbols.last_answer = Some(-3.0);
        symbols.variables.insert('B', -0.5);
        let n = normalize("ANS^2+B", &symbols, None, ParenPolicy::Repair).expect("normalizes");
        assert_eq!(n.to_string(), "(-3)^2+(-0.5)");
        assert_eq!(n.repaired_parens(), 0);
        let direct = evaluate(&n, AngleMode::Radian).expect("evaluates");
        let reparsed = evaluate(&norm(&n.to_string()), AngleMode::Radian).expect("evaluates");
        assert_eq!(direct, 8.5);
        assert_eq!(reparsed, direct);
    }

    #[test]
    fn substitutes_constants_only_as_whole_words() {
        assert_eq!(
            norm("2π").tokens(),
            &[Token::Number(2.0), Token::Number(std::f64::consts::PI)]
        );
        assert_eq!(norm("e").tokens(), &[Token::Number(std::f64::consts::E)]);
        assert_eq!(norm("φ").tokens(), &[Token::Number(PHI)]);
        assert_eq!(norm("exp(1)").tokens()[0], Token::Identifier("exp".into()));
        assert_eq!(norm("eps").tokens()[0], Token::Identifier("eps".into()));
    }

    #[test]
    fn canonicalizes_function_names() {
        assert_eq!(norm("SIN(1)").tokens()[0], Token::Identifier("sin".into()));
        assert_eq!(norm("asin(1)").tokens()[0], Token::Identifier("asin".into()));
        assert_eq!(norm("log10(1)").tokens()[0], Token::Identifier("log10".into()));
    }

    #[test]
    fn normalization_does_not_touch_symbols() {
        let mut symbols = SymbolTable::new();
        symbols.variables.insert('C', 3.0);
        let before = symbols.clone();
        normalize("C+ANS", &symbols, None, ParenPolicy::Repair).expect("normalizes");
        assert_eq!(symbols, before);
    }

    #[test]
    fn malformed_numbers_fail() {
        let err = normalize("1..2", &SymbolTable::new(), None, ParenPolicy::Repair)
            .expect_err("malformed");
        assert!(matches!(err, CalcError::Parse(_)));
    }
}
