/*!
A fast SQL LIKE pattern matcher.

Patterns use the SQL `LIKE` dialect: `%` matches any run of zero or more
codepoints, `_` matches exactly one codepoint, and an optional escape
character makes the wildcards (and itself) literal. A pattern is compiled
once into an immutable [`LikeMatcher`](matcher::LikeMatcher) that answers
whole-input match queries with a single pass over the input bytes.

## Features
- Full UTF-8 support: `_` counts codepoints, not bytes, without decoding
  the input at match time.
- Byte-level matching: patterns compile down to a dense DFA transition
  table, so the hot loop is one table load per input byte.
- Literal short-circuits: leading/trailing pattern literals become plain
  byte comparisons, and impossible input lengths are rejected before any
  scanning.

## Usage
```
use like_matcher::matcher::LikeMatcher;

let matcher = LikeMatcher::new("a%b").unwrap();
assert!(matcher.is_match("ab"));
assert!(matcher.is_match("a猫と犬b"));
assert!(matcher.is_match("abx") == false);

let matcher = LikeMatcher::builder(r"100\%").escape('\\').build().unwrap();
assert!(matcher.is_match("100%"));
assert!(matcher.is_match("100 bottles") == false);
```

## How it works
Compilation parses the pattern into literal and wildcard segments
([`syntax`]), merges adjacent wildcard runs, peels leading/trailing
literals off for direct comparison, and lowers the rest through a byte
NFA (wildcards become UTF-8 lead/continuation byte classes) and a
powerset construction into a dense DFA. A pattern ending in `%` drops the
trailing wildcard from the automaton entirely and scans in
stop-on-accept mode instead.
*/

mod automata;
pub mod matcher;
pub mod syntax;

#[cfg(test)]
mod tests {
    use crate::matcher::LikeMatcher;

    #[test]
    fn readme_examples() {
        let matcher = LikeMatcher::new("a%b").unwrap();
        assert!(matcher.is_match("ab"));
        assert!(matcher.is_match("a猫と犬b"));
        assert!(matcher.is_match("abx") == false);

        let matcher = LikeMatcher::builder(r"100\%").escape('\\').build().unwrap();
        assert!(matcher.is_match("100%"));
        assert!(matcher.is_match("100 bottles") == false);
    }

    #[test]
    fn shared_across_threads() {
        let matcher = LikeMatcher::new("%thread%").unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert!(matcher.is_match("a thread b"));
                    assert!(matcher.is_match("no match") == false);
                });
            }
        });
    }
}
