use std::ops::Range;

use bon::Builder;

/// A byte region to run a matcher over.
///
/// Built from `&str`, `&[u8]` or a byte array via `From` for
/// whole-haystack matches, or through the builder to restrict the match to
/// a byte span of a larger haystack:
///
/// ```
/// use like_matcher::matcher::{Input, LikeMatcher};
///
/// let matcher = LikeMatcher::new("b_d").unwrap();
/// let haystack = b"abcde";
/// assert!(matcher.is_match(Input::builder(haystack).span(1..4).build()));
/// assert!(matcher.is_match(haystack) == false);
/// ```
#[derive(Builder, Clone)]
pub struct Input<'h> {
    #[builder(start_fn)]
    pub(crate) haystack: &'h [u8],
    /// Byte range of the haystack the pattern must match in full. Defaults
    /// to the whole haystack. Must lie on valid indices; an out-of-range
    /// span panics at match time.
    pub(crate) span: Option<Range<usize>>,
}

impl<'h> Input<'h> {
    /// The bytes the matcher sees.
    pub(crate) fn region(&self) -> &'h [u8] {
        let haystack = self.haystack;
        match self.span.clone() {
            Some(span) => &haystack[span],
            None => haystack,
        }
    }
}

impl<'h> From<&'h [u8]> for Input<'h> {
    #[inline]
    fn from(haystack: &'h [u8]) -> Self {
        Input { haystack, span: None }
    }
}

impl<'h, const N: usize> From<&'h [u8; N]> for Input<'h> {
    #[inline]
    fn from(haystack: &'h [u8; N]) -> Self {
        Input { haystack, span: None }
    }
}

impl<'h> From<&'h str> for Input<'h> {
    #[inline]
    fn from(haystack: &'h str) -> Self {
        Input { haystack: haystack.as_bytes(), span: None }
    }
}

impl<'h> From<&'h String> for Input<'h> {
    #[inline]
    fn from(haystack: &'h String) -> Self {
        Input { haystack: haystack.as_bytes(), span: None }
    }
}
