/*!
Compiling and running LIKE patterns.

[`LikeMatcher`] compiles a SQL LIKE pattern into a dense byte-level DFA
once, then answers whole-input match queries in a single pass over the
input bytes. See the [crate docs](crate) for an overview of the pipeline.

## Example
```
use like_matcher::matcher::LikeMatcher;

let matcher = LikeMatcher::builder(r"100\%").escape('\\').build().unwrap();
assert!(matcher.is_match("100%"));
assert!(matcher.is_match("100X") == false);
```
*/
use bon::bon;

use crate::{
    automata::{dense::DenseDfa, determinize::determinize, nfa::Nfa},
    syntax::{self, Segment},
};

mod input;

pub use crate::syntax::ParseError;
pub use input::Input;

/// A compiled LIKE pattern.
///
/// The pattern matches the input in its entirety: `a%` matches `"abc"`
/// but not `"xabc"`. `%` matches any run of zero or more codepoints, `_`
/// matches exactly one codepoint, and an optional escape character makes
/// the following wildcard (or the escape itself) literal.
///
/// Inputs are byte slices assumed to be UTF-8; malformed input is never an
/// error, it simply fails to match wherever a wildcard would have to
/// accept it.
///
/// ## Example
/// ```
/// use like_matcher::matcher::LikeMatcher;
///
/// let matcher = LikeMatcher::new("a%b").unwrap();
/// assert!(matcher.is_match("ab"));
/// assert!(matcher.is_match("a猫🦀b"));
/// assert!(matcher.is_match("axxx") == false);
/// ```
///
/// ## Synchronization
/// A `LikeMatcher` is immutable after construction and keeps no caches,
/// so sharing one instance across threads needs no synchronization.
pub struct LikeMatcher {
    pattern: String,
    escape: Option<char>,

    /// Byte-length bounds any matching input must satisfy.
    min_len: usize,
    max_len: Option<usize>,

    /// Peeled leading/trailing literal bytes, compared directly instead of
    /// running the DFA over them.
    prefix: Box<[u8]>,
    suffix: Box<[u8]>,

    /// The automaton for whatever sits between prefix and suffix.
    dfa: DenseDfa,
}

#[bon]
impl LikeMatcher {
    /// Compile `pattern` with no escape character.
    pub fn new(pattern: &str) -> Result<LikeMatcher, ParseError> {
        Self::builder(pattern).build()
    }

    /// Compile a pattern with non-default options:
    ///
    /// ```
    /// use like_matcher::matcher::LikeMatcher;
    ///
    /// let matcher = LikeMatcher::builder("_o%").escape('!').build().unwrap();
    /// assert!(matcher.is_match("foobar"));
    /// ```
    #[builder(builder_type = Builder, finish_fn(name = build))]
    pub fn builder(
        #[builder(start_fn)] pattern: &str,
        /// Character that makes the following `%`, `_` or escape character
        /// itself literal. `escape` followed by anything else fails to
        /// compile.
        escape: Option<char>,
        /// Match leading and trailing pattern literals by direct byte
        /// comparison instead of encoding them into the DFA. Only worth
        /// disabling to cross-check the two paths against each other.
        #[builder(default = true)]
        peel_literals: bool,
    ) -> Result<LikeMatcher, ParseError> {
        let segments = syntax::optimize(syntax::parse(pattern, escape)?);
        let (min_len, max_len) = length_bounds(&segments);

        let mut middle = segments;
        let prefix = match middle.first() {
            Some(Segment::Literal(_)) if peel_literals => match middle.remove(0) {
                Segment::Literal(bytes) => bytes,
                _ => unreachable!(),
            },
            _ => Vec::new(),
        };
        let suffix = match middle.last() {
            Some(Segment::Literal(_)) if peel_literals => match middle.pop() {
                Some(Segment::Literal(bytes)) => bytes,
                _ => unreachable!(),
            },
            _ => Vec::new(),
        };

        // A trailing `%` need not be in the automaton at all: in
        // stop-on-accept mode the scan halts as soon as the rest of the
        // middle has matched, and whatever bytes remain are its run.
        let exact = match middle.last_mut() {
            Some(Segment::Any { unbounded, .. }) if *unbounded => {
                *unbounded = false;
                false
            }
            _ => true,
        };

        let nfa = Nfa::build(&middle);
        let dfa = determinize(&nfa);

        Ok(LikeMatcher {
            pattern: pattern.to_owned(),
            escape,
            min_len,
            max_len,
            prefix: prefix.into_boxed_slice(),
            suffix: suffix.into_boxed_slice(),
            dfa: DenseDfa::from_dfa(&dfa, exact),
        })
    }
}

/// High level convenience routines for running a compiled pattern.
impl LikeMatcher {
    /// Whether the pattern matches the input in its entirety.
    ///
    /// Accepts anything that converts into an [`Input`], in particular
    /// `&str` and `&[u8]`:
    ///
    /// ```
    /// use like_matcher::matcher::LikeMatcher;
    ///
    /// let matcher = LikeMatcher::new("%end").unwrap();
    /// assert!(matcher.is_match("the end"));
    /// assert!(matcher.is_match(b"ending".as_slice()) == false);
    /// ```
    #[inline]
    pub fn is_match<'h, I: Into<Input<'h>>>(&self, input: I) -> bool {
        let region = input.into().region();
        if region.len() < self.min_len {
            return false;
        }
        if self.max_len.is_some_and(|max| region.len() > max) {
            return false;
        }
        if !region.starts_with(&self.prefix) {
            return false;
        }
        if !region.ends_with(&self.suffix) {
            return false;
        }
        // The length bound above guarantees the interior slice is in
        // range: min_len covers both literals.
        self.dfa
            .matches(&region[self.prefix.len()..region.len() - self.suffix.len()])
    }

    /// The pattern text this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The configured escape character, if any.
    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    /// The smallest byte length any matching input can have.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// The largest byte length any matching input can have, or `None` if
    /// the pattern contains an unescaped `%`.
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }
}

/// Byte-length bounds over the optimized segment sequence: literals count
/// their exact byte length, a wildcard run counts `min` bytes at least and
/// `min * 4` bytes at most (the widest UTF-8 encoding), and any unbounded
/// run lifts the upper bound entirely.
fn length_bounds(segments: &[Segment]) -> (usize, Option<usize>) {
    let mut min_len = 0usize;
    let mut max_len = Some(0usize);
    for segment in segments {
        match segment {
            Segment::Literal(bytes) => {
                min_len += bytes.len();
                max_len = max_len.map(|max| max + bytes.len());
            }
            Segment::Any { min, unbounded } => {
                min_len += *min as usize;
                max_len = match unbounded {
                    true => None,
                    false => max_len.map(|max| max + *min as usize * 4),
                };
            }
        }
    }
    (min_len, max_len)
}
