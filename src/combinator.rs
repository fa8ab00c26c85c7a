//! Parser combinator engine.
//!
//! A parser is any value implementing [`Parser`]: a function from
//! `(input, position)` to either the parsed value plus the position just past
//! it, or a [`Failure`] carrying a message and the offset where parsing went
//! wrong. Parsers hold no mutable state, so one compiled grammar can be shared
//! across threads and reused across inputs.
//!
//! A failing parser never consumes anything: the caller is always free to
//! retry another parser from the position it started with. Positions are
//! byte offsets into the input.

use std::borrow::Cow;
use std::fmt;

/// A parse attempt that did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: Cow<'static, str>,
    pub position: usize,
}

impl Failure {
    pub fn new(message: impl Into<Cow<'static, str>>, position: usize) -> Self {
        Failure {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for Failure {}

/// Parsed value and the position right after it, or the failure.
pub type ParseResult<T> = Result<(T, usize), Failure>;

/// Something that can parse a `T` out of a string starting at a position.
pub trait Parser<T> {
    fn parse(&self, input: &str, position: usize) -> ParseResult<T>;
}

impl<T, F> Parser<T> for F
where
    F: Fn(&str, usize) -> ParseResult<T>,
{
    fn parse(&self, input: &str, position: usize) -> ParseResult<T> {
        self(input, position)
    }
}

/// Type-erased parser, used where alternatives of different types are listed.
pub type BoxedParser<T> = Box<dyn Parser<T> + Send + Sync>;

pub fn boxed<T: 'static>(parser: impl Parser<T> + Send + Sync + 'static) -> BoxedParser<T> {
    Box::new(parser)
}

/// Describe what sits at `position`, for error messages.
pub fn unexpected(input: &str, position: usize) -> String {
    match input.get(position..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("unexpected `{}`", c.escape_debug()),
        None => "unexpected end of input".to_string(),
    }
}

// ============================================================================
// Trivia
// ============================================================================

/// Position of the first non-whitespace byte at or after `position`.
pub fn skip_whitespace(input: &str, position: usize) -> usize {
    let bytes = input.as_bytes();
    let mut pos = position;
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

/// Skip whitespace and at most one comma between arguments.
pub fn skip_separator(input: &str, position: usize) -> usize {
    let pos = skip_whitespace(input, position);
    if input.as_bytes().get(pos) == Some(&b',') {
        skip_whitespace(input, pos + 1)
    } else {
        pos
    }
}

/// Apply `parser` after skipping whitespace and an optional comma.
pub fn consume_trivia<T>(parser: impl Parser<T>) -> impl Parser<T> {
    move |input: &str, position: usize| -> ParseResult<T> {
        parser.parse(input, skip_separator(input, position))
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Match `expected` exactly.
pub fn literal(expected: &'static str) -> impl Parser<&'static str> {
    move |input: &str, position: usize| -> ParseResult<&'static str> {
        match input.get(position..) {
            Some(rest) if rest.starts_with(expected) => Ok((expected, position + expected.len())),
            _ => Err(Failure::new(
                format!("expected `{expected}`, {}", unexpected(input, position)),
                position,
            )),
        }
    }
}

fn skip_digits(bytes: &[u8], position: usize) -> usize {
    let mut pos = position;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// A decimal number: optional sign, digits, optional fraction, optional
/// exponent.
///
/// A sign always starts a new number, so `1-2` reads as `1` then `-2`, and a
/// second decimal point does too, so `.5.5` reads as `.5` then `.5`. The
/// exponent is only taken when digits follow the `e`.
pub fn number() -> impl Parser<f64> {
    |input: &str, position: usize| -> ParseResult<f64> {
        let bytes = input.as_bytes();
        let mut end = position;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }

        let integer_end = skip_digits(bytes, end);
        let mut digits = integer_end - end;
        end = integer_end;

        if bytes.get(end) == Some(&b'.') {
            let fraction_end = skip_digits(bytes, end + 1);
            digits += fraction_end - (end + 1);
            if digits > 0 {
                end = fraction_end;
            }
        }

        if digits == 0 {
            return Err(Failure::new(
                format!("expected number, {}", unexpected(input, position)),
                position,
            ));
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }
            let exponent_end = skip_digits(bytes, exponent);
            if exponent_end > exponent {
                end = exponent_end;
            }
        }

        let text = input
            .get(position..end)
            .ok_or_else(|| Failure::new("number is not on a character boundary", position))?;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok((value, end)),
            _ => Err(Failure::new(format!("number `{text}` is out of range"), position)),
        }
    }
}

/// A single `0` or `1` digit, with no separator required after it.
pub fn flag() -> impl Parser<bool> {
    |input: &str, position: usize| -> ParseResult<bool> {
        match input.as_bytes().get(position) {
            Some(b'0') => Ok((false, position + 1)),
            Some(b'1') => Ok((true, position + 1)),
            _ => Err(Failure::new(
                format!("expected flag `0` or `1`, {}", unexpected(input, position)),
                position,
            )),
        }
    }
}

/// Succeeds only at the end of the input.
pub fn end_of_input() -> impl Parser<()> {
    |input: &str, position: usize| -> ParseResult<()> {
        if position >= input.len() {
            Ok(((), position))
        } else {
            Err(Failure::new(unexpected(input, position), position))
        }
    }
}

// ============================================================================
// Combinators
// ============================================================================

/// `first` immediately followed by `second`.
pub fn pair<A, B>(first: impl Parser<A>, second: impl Parser<B>) -> impl Parser<(A, B)> {
    move |input: &str, position: usize| -> ParseResult<(A, B)> {
        let (a, next) = first.parse(input, position)?;
        let (b, next) = second.parse(input, next)?;
        Ok(((a, b), next))
    }
}

/// Transform the value of a successful parse.
pub fn map<T, U>(parser: impl Parser<T>, f: impl Fn(T) -> U) -> impl Parser<U> {
    move |input: &str, position: usize| -> ParseResult<U> {
        let (value, next) = parser.parse(input, position)?;
        Ok((f(value), next))
    }
}

/// Never fails; yields `None` without consuming when `parser` fails.
pub fn optional<T>(parser: impl Parser<T>) -> impl Parser<Option<T>> {
    move |input: &str, position: usize| -> ParseResult<Option<T>> {
        match parser.parse(input, position) {
            Ok((value, next)) => Ok((Some(value), next)),
            Err(_) => Ok((None, position)),
        }
    }
}

/// Apply `parser` until it fails. At least one success is required.
///
/// A repeat that fails right after the separators ends the list. A repeat
/// that fails further in was started and broke, so its failure is returned.
pub fn one_or_more<T>(parser: impl Parser<T>) -> impl Parser<Vec<T>> {
    move |input: &str, position: usize| -> ParseResult<Vec<T>> {
        let (first, mut next) = parser.parse(input, position)?;
        let mut values = vec![first];
        loop {
            match parser.parse(input, next) {
                // A parser that matched nothing would repeat forever.
                Ok((_, after)) if after == next => break,
                Ok((value, after)) => {
                    values.push(value);
                    next = after;
                }
                Err(failure) if failure.position > skip_separator(input, next) => {
                    return Err(failure);
                }
                Err(_) => break,
            }
        }
        Ok((values, next))
    }
}

/// Try each parser in order from the same position and return the first
/// success.
///
/// When all fail, the failure that got furthest into the input wins; ties go
/// to the earlier alternative.
pub fn one_of<T>(parsers: Vec<BoxedParser<T>>) -> impl Parser<T> {
    move |input: &str, position: usize| -> ParseResult<T> {
        let mut furthest: Option<Failure> = None;
        for parser in &parsers {
            match parser.parse(input, position) {
                Ok(success) => return Ok(success),
                Err(failure) => {
                    if furthest
                        .as_ref()
                        .is_none_or(|best| failure.position > best.position)
                    {
                        furthest = Some(failure);
                    }
                }
            }
        }
        Err(furthest.unwrap_or_else(|| Failure::new("no alternatives to try", position)))
    }
}

/// Run `parser` over the whole of `input`, allowing surrounding whitespace.
pub fn parse_all<T>(parser: impl Parser<T>, input: &str) -> Result<T, Failure> {
    let (value, next) = parser.parse(input, skip_whitespace(input, 0))?;
    end_of_input().parse(input, skip_whitespace(input, next))?;
    Ok(value)
}
