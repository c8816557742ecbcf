/*! Pattern trees and the span-matching algorithm.

A compiled pattern is a tree of [`Pattern`] nodes, one per construct of the
pattern string. Every node owns a [`MatchTable`]; [`Pattern::locate`] fills
the tables bottom-up for a given input, and the query methods
([`Pattern::matches`], [`Pattern::matching_spans`], ...) then read the root's
table. Matching an inner node never consults anything outside its own
subtree, so each table depends only on the node's children and the input.
*/

#[cfg(feature = "ascii-tree")]
mod ascii_tree;


use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use crate::table::{MatchTable, Span};

/// A compiled pattern.
///
/// Patterns are built bottom-up, children before parents, either by
/// [`crate::parse`] or through the constructors below; construction never
/// fails. Malformed pattern strings are rejected by the parser before any
/// node exists.
#[derive(Clone)]
pub struct Pattern {
    kind: PatternKind,
    table: MatchTable,
}

/// The different kinds of pattern nodes.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Matches one literal byte.
    Symbol(u8),
    /// Matches according to one of the metacharacters `.`, `^` and `$`.
    Metachar(Metachar),
    /// Matches one byte of a `[...]` character class.
    Class(CharClass),
    /// Matches the first pattern followed immediately by the second.
    Concat(Box<Pattern>, Box<Pattern>),
    /// Matches the first pattern, or the second when the first matches
    /// nowhere in the input. See [`Pattern::alternation`].
    Alternation(Box<Pattern>, Box<Pattern>),
    /// Matches consecutive repetitions of the child pattern.
    Repetition(Box<Pattern>, Quantifier),
}

/// Metacharacters that match something other than a literal byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metachar {
    /// `.`, matches any single byte.
    Any,
    /// `^`, matches the empty span at the start of the input.
    Start,
    /// `$`, matches the empty span at the end of the input.
    End,
}

impl Display for Metachar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Metachar::Any => write!(f, "."),
            Metachar::Start => write!(f, "^"),
            Metachar::End => write!(f, "$"),
        }
    }
}

/// A `[...]` character class: literal bytes and inclusive ranges, optionally
/// negated.
///
/// A byte belongs to a non-negated class when it matches at least one term,
/// and to a negated class when it matches none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    negated: bool,
    terms: Vec<ClassTerm>,
}

impl CharClass {
    pub fn new(negated: bool, terms: Vec<ClassTerm>) -> Self {
        Self { negated, terms }
    }

    /// Returns true if `byte` belongs to the class.
    pub fn contains(&self, byte: u8) -> bool {
        let in_terms = self.terms.iter().any(|term| term.matches(byte));
        in_terms != self.negated
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if self.negated {
            write!(f, "^")?;
        }
        for term in &self.terms {
            match *term {
                ClassTerm::Literal(byte) => write!(f, "{}", byte as char)?,
                ClassTerm::Range(start, end) => {
                    write!(f, "{}-{}", start as char, end as char)?
                }
            }
        }
        write!(f, "]")
    }
}

/// A single term of a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTerm {
    /// A literal byte.
    Literal(u8),
    /// An inclusive `X-Y` byte range; `X <= Y` always holds for parsed
    /// classes.
    Range(u8, u8),
}

impl ClassTerm {
    fn matches(&self, byte: u8) -> bool {
        match *self {
            ClassTerm::Literal(literal) => byte == literal,
            ClassTerm::Range(start, end) => start <= byte && byte <= end,
        }
    }
}

/// The quantifier of a repetition node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
    /// `{m,n}`, `{m,}` or `{,n}`; `max` is `None` when unbounded above.
    Bounded { min: usize, max: Option<usize> },
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Quantifier::ZeroOrMore => write!(f, "*"),
            Quantifier::OneOrMore => write!(f, "+"),
            Quantifier::ZeroOrOne => write!(f, "?"),
            Quantifier::Bounded { min, max: Some(max) } => {
                write!(f, "{{{},{}}}", min, max)
            }
            Quantifier::Bounded { min, max: None } => {
                write!(f, "{{{},}}", min)
            }
        }
    }
}

impl Pattern {
    /// Leaf that matches the literal byte `symbol`.
    pub fn symbol(symbol: u8) -> Pattern {
        Pattern::from_kind(PatternKind::Symbol(symbol))
    }

    /// Leaf that matches according to `metachar`.
    pub fn metachar(metachar: Metachar) -> Pattern {
        Pattern::from_kind(PatternKind::Metachar(metachar))
    }

    /// Leaf that matches one byte belonging to `class`.
    pub fn class(class: CharClass) -> Pattern {
        Pattern::from_kind(PatternKind::Class(class))
    }

    /// `first` followed immediately by `second`.
    pub fn concat(first: Pattern, second: Pattern) -> Pattern {
        Pattern::from_kind(PatternKind::Concat(
            Box::new(first),
            Box::new(second),
        ))
    }

    /// `preferred`, falling back to `fallback`.
    ///
    /// The fallback applies to the input as a whole, not span by span: when
    /// `preferred` matches at least one span anywhere in the input, the
    /// alternation's matches are exactly `preferred`'s, and `fallback`'s
    /// matches are ignored even where `preferred` does not match. Only when
    /// `preferred` matches nowhere are `fallback`'s matches used.
    pub fn alternation(preferred: Pattern, fallback: Pattern) -> Pattern {
        Pattern::from_kind(PatternKind::Alternation(
            Box::new(preferred),
            Box::new(fallback),
        ))
    }

    /// `child` repeated as described by `quantifier`.
    pub fn repetition(child: Pattern, quantifier: Quantifier) -> Pattern {
        Pattern::from_kind(PatternKind::Repetition(
            Box::new(child),
            quantifier,
        ))
    }

    fn from_kind(kind: PatternKind) -> Pattern {
        Pattern { kind, table: MatchTable::default() }
    }

    /// The node's kind, for callers that want to walk the tree.
    #[inline]
    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// The node's match table for the most recent input.
    #[inline]
    pub fn table(&self) -> &MatchTable {
        &self.table
    }

    /// Rebuilds the match tables of this node and all of its children for
    /// the given input.
    ///
    /// Children are located first, then their tables are combined into this
    /// node's table:
    ///
    /// - `Symbol`, `Metachar` and `Class` mark their spans directly from
    ///   the input bytes.
    /// - `Concat` marks `[begin, end)` when some split point `k` has the
    ///   first child matching `[begin, k)` and the second `[k, end)`.
    /// - `Alternation` copies the preferred child's table wholesale when it
    ///   has any match, and the fallback child's table otherwise.
    /// - `Repetition` seeds the table with the child's direct matches (plus
    ///   all empty spans when the minimum count is zero) and then closes it
    ///   transitively, so consecutive child matches concatenate. For
    ///   bounded quantifiers the child's matches are counted over the whole
    ///   input first; a count outside the bound leaves the table all-false.
    ///
    /// Any table built for a previous input is discarded.
    pub fn locate(&mut self, haystack: &[u8]) {
        let len = haystack.len();
        let Pattern { kind, table } = self;

        table.reset(len);

        match kind {
            PatternKind::Symbol(symbol) => {
                for (pos, byte) in haystack.iter().enumerate() {
                    if *byte == *symbol {
                        table.set(pos, pos + 1);
                    }
                }
            }
            PatternKind::Metachar(Metachar::Any) => {
                for pos in 0..len {
                    table.set(pos, pos + 1);
                }
            }
            PatternKind::Metachar(Metachar::Start) => {
                table.set(0, 0);
            }
            PatternKind::Metachar(Metachar::End) => {
                table.set(len, len);
            }
            PatternKind::Class(class) => {
                for (pos, byte) in haystack.iter().enumerate() {
                    if class.contains(*byte) {
                        table.set(pos, pos + 1);
                    }
                }
            }
            PatternKind::Concat(first, second) => {
                first.locate(haystack);
                second.locate(haystack);
                for begin in 0..=len {
                    for end in begin..=len {
                        for k in begin..=end {
                            if first.table.get(begin, k)
                                && second.table.get(k, end)
                            {
                                table.set(begin, end);
                                break;
                            }
                        }
                    }
                }
            }
            PatternKind::Alternation(preferred, fallback) => {
                preferred.locate(haystack);
                fallback.locate(haystack);
                // Whole-input fallback, not a per-span union: the second
                // alternative counts only when the first matches nowhere.
                if preferred.table.any() {
                    table.merge(&preferred.table);
                } else {
                    table.merge(&fallback.table);
                }
            }
            PatternKind::Repetition(child, quantifier) => {
                child.locate(haystack);
                match *quantifier {
                    Quantifier::ZeroOrMore => {
                        table.merge(&child.table);
                        table.mark_empty_spans();
                        table.close_transitive();
                    }
                    Quantifier::OneOrMore => {
                        table.merge(&child.table);
                        table.close_transitive();
                    }
                    Quantifier::ZeroOrOne => {
                        table.merge(&child.table);
                        table.mark_empty_spans();
                    }
                    Quantifier::Bounded { min, max } => {
                        // The child's matches are counted across the whole
                        // input, not per start position. A count outside
                        // the bound means no matches at all, the empty
                        // span included.
                        let count = child.table.count();
                        let within = count >= min
                            && max.map_or(true, |max| count <= max);
                        if within {
                            table.merge(&child.table);
                            if min == 0 {
                                table.mark_empty_spans();
                            }
                            table.close_transitive();
                        }
                    }
                }
            }
        }
    }

    /// Returns true if the pattern matches exactly the bytes `begin..end`
    /// of the input most recently passed to [`locate`].
    ///
    /// # Panics
    ///
    /// If `begin > end` or `end` exceeds the length of that input.
    ///
    /// [`locate`]: Pattern::locate
    #[inline]
    pub fn matches(&self, begin: usize, end: usize) -> bool {
        self.table.get(begin, end)
    }

    /// Returns true if the pattern matches anywhere in the most recent
    /// input.
    #[inline]
    pub fn has_matches(&self) -> bool {
        self.table.any()
    }

    /// Iterator over every matching span of the most recent input, ordered
    /// by start position and then by end position.
    pub fn matching_spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.table.spans()
    }

    /// Length of the input most recently passed to [`locate`]. Zero for a
    /// pattern that has not been located yet.
    ///
    /// [`locate`]: Pattern::locate
    #[inline]
    pub fn haystack_len(&self) -> usize {
        self.table.haystack_len()
    }

    /// Returns a representation of the pattern as an ASCII tree.
    #[cfg(feature = "ascii-tree")]
    #[cfg_attr(docsrs, doc(cfg(feature = "ascii-tree")))]
    pub fn ascii_tree(&self) -> ::ascii_tree::Tree {
        ascii_tree::pattern_ascii_tree(self)
    }
}

impl FromStr for Pattern {
    type Err = crate::parser::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

#[cfg(feature = "ascii-tree")]
impl Debug for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        ::ascii_tree::write_tree(&mut output, &self.ascii_tree())?;
        write!(f, "{}", output)
    }
}

#[cfg(not(feature = "ascii-tree"))]
impl Debug for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern")
    }
}
