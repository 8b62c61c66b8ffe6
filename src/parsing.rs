//! Parsers for the rational text format.
//!
//! The format is `"<int>"` or `"<int>/<int>"`, with whitespace tolerated around the slash on
//! input. [`rational`] is incremental: it reads one value off the front of the input and leaves
//! the rest, so it can be embedded in larger grammars. [`rational_str`] is the whole-string form
//! behind [`str::parse`].

use nom::character::complete::{char, i32 as base_int, multispace0};
use nom::combinator::{all_consuming, cut, map_res, opt};
use nom::error::ParseError;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use crate::rational::{Rational, RationalError};

/// Reads a rational off the front of the input: a signed decimal numerator, optionally followed
/// by a slash and a signed decimal denominator. A missing numerator fails with nothing consumed.
/// Once a slash has been seen the denominator is required, and a denominator of zero fails the
/// parse. Successful parses go through [`Rational::new`], so the result is always canonical.
pub fn rational(input: &str) -> IResult<&str, Rational> {
    map_res(
        pair(base_int, opt(preceded(ws(slash), cut(base_int)))),
        |(numerator, denominator)| Rational::new(numerator, denominator.unwrap_or(1)),
    )(input)
}

/// Parses the slash separating numerator and denominator.
pub fn slash(input: &str) -> IResult<&str, char> {
    char('/')(input)
}

/// Parses a complete rational, tolerating surrounding whitespace but requiring that the entire
/// input is consumed.
pub fn rational_str(input: &str) -> Result<Rational, RationalError> {
    all_consuming(delimited(multispace0, rational, multispace0))(input)
        .map(|(_, r)| r)
        .map_err(|_| RationalError::Parse(input.to_owned()))
}

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading and
/// trailing whitespace, returning the output of `inner`.
fn ws<'a, F: 'a, O, E: ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Fn(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ratio;

    use super::*;

    #[test]
    fn test_leaves_trailing_input() {
        assert_eq!(rational("5 rest"), Ok((" rest", ratio!(5))));
        assert_eq!(rational("1 / 2, tail"), Ok((", tail", ratio!(1 / 2))));
        assert_eq!(rational("4/8)"), Ok((")", ratio!(1 / 2))));
    }

    #[test]
    fn test_whitespace_around_slash() {
        for s in ["1/2", "1 /2", "1/ 2", "1  /  2"] {
            assert_eq!(rational(s), Ok(("", ratio!(1 / 2))));
        }
    }

    #[test]
    fn test_signs() {
        assert_eq!(rational("-7/2"), Ok(("", -ratio!(7 / 2))));
        assert_eq!(rational("+3/6"), Ok(("", ratio!(1 / 2))));
        // A negative denominator is accepted and normalized away.
        assert_eq!(rational("1/-2"), Ok(("", -ratio!(1 / 2))));
    }

    #[test]
    fn test_failures() {
        assert!(rational("abc").is_err());
        assert!(rational("/2").is_err());
        assert!(rational("1/").is_err());
        assert!(rational("1 / x").is_err());
        assert!(rational("1/0").is_err());
    }

    #[test]
    fn test_rational_str() {
        assert_eq!(rational_str("  1 / 2  "), Ok(ratio!(1 / 2)));
        assert_eq!(rational_str("3"), Ok(ratio!(3)));
        assert_eq!(
            rational_str("1/0"),
            Err(RationalError::Parse("1/0".to_owned()))
        );
        assert!(rational_str("1 / 2 extra").is_err());
        assert!(rational_str("").is_err());
    }
}
