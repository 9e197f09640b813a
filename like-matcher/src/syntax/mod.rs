/*!
SQL LIKE pattern syntax support.

Supported syntax:
- `%`: matches any run of zero or more codepoints.
- `_`: matches exactly one codepoint.
- Any other character matches itself.
- With an escape character `E` configured, `E%`, `E_` and `EE` match the
  literal characters `%`, `_` and `E` respectively. `E` followed by anything
  else is a [`ParseError`], as is `E` at the end of the pattern.

[`parse`] turns pattern text into a sequence of [`Segment`]s; [`optimize`]
normalizes the sequence so that no two wildcard runs are adjacent.

## Example
```
use like_matcher::syntax::{parse, optimize, Segment};

let segments = optimize(parse("a%_c", None).unwrap());
assert_eq!(
    segments,
    vec![
        Segment::Literal(b"a".to_vec()),
        Segment::Any { min: 1, unbounded: true },
        Segment::Literal(b"c".to_vec()),
    ],
);
```

## Escape precedence
The escape character may itself be `%` or `_`. The scanner tests for the
escape character before the wildcard rules, so configuring `escape = '%'`
effectively disables the `%` wildcard: `"%%"` then matches a literal `%`
and a lone `"%"` fails to parse.
*/
use std::{fmt, mem};

use itertools::Itertools;

/// One element of a parsed pattern, in match order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A nonempty run of UTF-8 bytes the input must contain exactly.
    Literal(Vec<u8>),
    /// A wildcard run matching at least `min` codepoints, and any number
    /// more if `unbounded`.
    Any { min: u32, unbounded: bool },
}

/// An error that occurred while parsing a pattern.
///
/// Misusing the escape character is the only way parsing can fail: the
/// escape must be followed by `%`, `_` or the escape character itself, and
/// the pattern must not end mid-escape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    offset: usize,
    found: Option<char>,
}

impl ParseError {
    fn invalid_escape(offset: usize, found: Option<char>) -> ParseError {
        ParseError { offset, found }
    }

    /// The byte offset in the pattern at which the invalid escape occurred.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The character following the escape, or `None` if the pattern ended
    /// mid-escape.
    pub fn found(&self) -> Option<char> {
        self.found
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(c) => write!(
                f,
                "invalid escape at byte {}: the escape character must be \
                 followed by '%', '_' or itself, found {:?}",
                self.offset, c,
            ),
            None => write!(
                f,
                "invalid escape at byte {}: the pattern ended mid-escape",
                self.offset,
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse pattern text into segments, honoring the optional escape
/// character.
///
/// Literal characters are accumulated into maximal [`Segment::Literal`]
/// runs; `%` becomes `Any { min: 0, unbounded: true }` and `_` becomes
/// `Any { min: 1, unbounded: false }`. The result is not yet normalized,
/// see [`optimize`].
pub fn parse(pattern: &str, escape: Option<char>) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut escaped = false;

    for (at, c) in pattern.char_indices() {
        if escaped {
            if c != '%' && c != '_' && Some(c) != escape {
                return Err(ParseError::invalid_escape(at, Some(c)));
            }
            literal.push(c);
            escaped = false;
        } else if Some(c) == escape {
            escaped = true;
        } else if c == '%' {
            flush_literal(&mut literal, &mut segments);
            segments.push(Segment::Any { min: 0, unbounded: true });
        } else if c == '_' {
            flush_literal(&mut literal, &mut segments);
            segments.push(Segment::Any { min: 1, unbounded: false });
        } else {
            literal.push(c);
        }
    }
    if escaped {
        return Err(ParseError::invalid_escape(pattern.len(), None));
    }
    flush_literal(&mut literal, &mut segments);

    Ok(segments)
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(mem::take(literal).into_bytes()));
    }
}

/// Merge every maximal run of adjacent wildcard segments into a single
/// [`Segment::Any`] whose `min` is the sum of the run's minimums and whose
/// `unbounded` is the OR of the run's flags.
///
/// Literals pass through unchanged and order is preserved. Optimizing an
/// already-optimized sequence is a no-op.
pub fn optimize(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .coalesce(|a, b| match (a, b) {
            (
                Segment::Any { min: a_min, unbounded: a_unbounded },
                Segment::Any { min: b_min, unbounded: b_unbounded },
            ) => Ok(Segment::Any {
                min: a_min + b_min,
                unbounded: a_unbounded || b_unbounded,
            }),
            (a, b) => Err((a, b)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.as_bytes().to_vec())
    }

    fn any(min: u32, unbounded: bool) -> Segment {
        Segment::Any { min, unbounded }
    }

    #[test]
    fn literal_only() {
        assert_eq!(parse("abc", None).unwrap(), vec![lit("abc")]);
        assert_eq!(parse("", None).unwrap(), vec![]);
        assert_eq!(parse("猫犬", None).unwrap(), vec![lit("猫犬")]);
    }

    #[test]
    fn wildcards() {
        assert_eq!(
            parse("a%b", None).unwrap(),
            vec![lit("a"), any(0, true), lit("b")],
        );
        assert_eq!(
            parse("_a_", None).unwrap(),
            vec![any(1, false), lit("a"), any(1, false)],
        );
        assert_eq!(
            parse("%%__", None).unwrap(),
            vec![any(0, true), any(0, true), any(1, false), any(1, false)],
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(parse(r"100\%", Some('\\')).unwrap(), vec![lit("100%")]);
        assert_eq!(parse(r"a\_b", Some('\\')).unwrap(), vec![lit("a_b")]);
        assert_eq!(parse(r"a\\b", Some('\\')).unwrap(), vec![lit(r"a\b")]);
        // Without an escape configured, '\' is an ordinary character.
        assert_eq!(parse(r"a\b", None).unwrap(), vec![lit(r"a\b")]);
    }

    #[test]
    fn invalid_escapes() {
        let err = parse(r"a\bc", Some('\\')).unwrap_err();
        assert_eq!(err.offset(), 2);
        assert_eq!(err.found(), Some('b'));

        let err = parse(r"abc\", Some('\\')).unwrap_err();
        assert_eq!(err.offset(), 4);
        assert_eq!(err.found(), None);

        let err = parse(r"\", Some('\\')).unwrap_err();
        assert_eq!(err.found(), None);
    }

    #[test]
    fn wildcard_as_escape() {
        // The escape rule fires before the wildcard rule, so an escape
        // character of '%' disables the '%' wildcard.
        assert_eq!(parse("%%", Some('%')).unwrap(), vec![lit("%")]);
        assert_eq!(parse("%_", Some('%')).unwrap(), vec![lit("_")]);
        assert!(parse("%", Some('%')).is_err());
        assert_eq!(parse("__", Some('_')).unwrap(), vec![lit("_")]);
    }

    #[test]
    fn optimize_merges_wildcard_runs() {
        assert_eq!(
            optimize(parse("%%__", None).unwrap()),
            vec![any(2, true)],
        );
        assert_eq!(
            optimize(parse("a%_b__", None).unwrap()),
            vec![lit("a"), any(1, true), lit("b"), any(2, false)],
        );
        assert_eq!(optimize(parse("___", None).unwrap()), vec![any(3, false)]);
    }

    #[test]
    fn optimize_is_idempotent() {
        for pattern in ["", "abc", "%%a__%b%", "_%_", "%猫%犬%"] {
            let once = optimize(parse(pattern, None).unwrap());
            assert_eq!(optimize(once.clone()), once);
        }
    }
}
