/*! A regular expression engine that reports every matching span.

Most regex engines answer the question "where is the first, or the
leftmost-longest, match?". This crate answers a different one: given a
pattern and an input string, *which substrings does the pattern match*? The
answer is the full set of matching spans `[begin, end)`, computed with an
interval dynamic-programming algorithm over a per-node match table.

The input domain is raw bytes; patterns themselves are ASCII strings.

# Pattern syntax

- `a`: any character outside the metacharacter set `. ^ $ * ? + | ( ) [ {`
  matches itself.
- `.`: matches any single character.
- `^` / `$`: match the empty string at the start / end of the input.
- `[abc]`: character class; supports `a-z` ranges and leading-`^` negation.
- `p|q`: matches what `p` matches; `q`'s matches are used only when `p`
  matches nowhere in the input (see [`Pattern::alternation`]).
- `p*`, `p+`, `p?`: zero or more, one or more, zero or one consecutive
  matches of `p`.
- `p{m,n}`: bounded repetition; `{m,}` and `{,n}` leave one end open.
- `(p)`: grouping.

# Example

```rust
let mut pattern = spanre::parse("b(an)*a").unwrap();

pattern.locate(b"banana");

assert!(pattern.matches(0, 6));
assert!(pattern.matches(0, 4));
assert!(!pattern.matches(2, 6));
```

The same compiled pattern is meant to be reused across many inputs: each
call to [`Pattern::locate`] discards the previous tables and rebuilds them
for the new input.
*/

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod parser;
pub mod pattern;
pub mod table;

pub use parser::parse;
pub use parser::Error;
pub use pattern::CharClass;
pub use pattern::ClassTerm;
pub use pattern::Metachar;
pub use pattern::Pattern;
pub use pattern::PatternKind;
pub use pattern::Quantifier;
pub use table::MatchTable;
pub use table::Span;
