//! Parsers for the whitespace-separated string forms accepted on the command line
//! and by `--set`, e.g. `"0 200"`, `"13. 33."` or `"3 7 11"`.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {expected} whitespace-separated values in '{input}', found {found}.")]
    WrongCount {
        input: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid {kind} '{token}' in '{input}'.")]
    InvalidToken {
        input: String,
        token: String,
        kind: &'static str,
    },

    #[error("List '{0}' must name at least one entry.")]
    EmptyList(String),
}

fn parse_tokens<T: FromStr>(input: &str, kind: &'static str) -> Result<Vec<T>, ParseError> {
    input
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| ParseError::InvalidToken {
                input: input.to_string(),
                token: token.to_string(),
                kind,
            })
        })
        .collect()
}

fn parse_pair<T: FromStr + Copy>(input: &str, kind: &'static str) -> Result<(T, T), ParseError> {
    match parse_tokens::<T>(input, kind)?.as_slice() {
        &[a, b] => Ok((a, b)),
        values => Err(ParseError::WrongCount {
            input: input.to_string(),
            expected: 2,
            found: values.len(),
        }),
    }
}

/// `"start end"` → `(start, end)`.
pub fn parse_index_range(input: &str) -> Result<(usize, usize), ParseError> {
    parse_pair(input, "trajectory index")
}

/// `"min max"` → `(min, max)`.
pub fn parse_lambda_range(input: &str) -> Result<(f64, f64), ParseError> {
    parse_pair(input, "lambda value")
}

/// Index list; blank input means no exclusions.
pub fn parse_index_list(input: &str) -> Result<Vec<usize>, ParseError> {
    parse_tokens(input, "trajectory index")
}

pub fn parse_name_list(input: &str) -> Result<Vec<String>, ParseError> {
    let names: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    if names.is_empty() {
        return Err(ParseError::EmptyList(input.to_string()));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_range_accepts_extra_whitespace() {
        assert_eq!(parse_index_range("  0   200 "), Ok((0, 200)));
    }

    #[test]
    fn lambda_range_accepts_trailing_dot_floats() {
        assert_eq!(parse_lambda_range("13. 33."), Ok((13.0, 33.0)));
    }

    #[test]
    fn range_with_wrong_arity_is_rejected() {
        assert_eq!(
            parse_index_range("0 200 5"),
            Err(ParseError::WrongCount {
                input: "0 200 5".to_string(),
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn negative_index_is_rejected() {
        assert!(matches!(
            parse_index_list("3 -7"),
            Err(ParseError::InvalidToken { token, .. }) if token == "-7"
        ));
    }

    #[test]
    fn blank_exclusion_list_is_empty() {
        assert_eq!(parse_index_list(" "), Ok(vec![]));
        assert_eq!(parse_index_list("3 7 11"), Ok(vec![3, 7, 11]));
    }

    #[test]
    fn name_list_requires_an_entry() {
        assert_eq!(
            parse_name_list("u b s1 s2"),
            Ok(vec!["u".into(), "b".into(), "s1".into(), "s2".into()])
        );
        assert!(matches!(parse_name_list("   "), Err(ParseError::EmptyList(_))));
    }
}
