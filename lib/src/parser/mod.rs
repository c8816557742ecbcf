/*! Recursive-descent parser for pattern strings.

Grammar, lowest to highest precedence:

```text
alternation   := concatenation ('|' concatenation)*
concatenation := repetition+
repetition    := atomic ('*' | '+' | '?' | '{' bound '}')*
atomic        := ordinary | '.' | '^' | '$' | '[' class ']' | '(' alternation ')'
bound         := digits? ',' digits?
```

Ordinary characters are all characters outside the metacharacter set
`. ^ $ * ? + | ( ) [ {`. Note that `]` and `}` are ordinary wherever they
do not close a construct.
*/

mod errors;


use log::debug;

pub use errors::Error;

use crate::pattern::{CharClass, ClassTerm, Metachar, Pattern, Quantifier};

/// Characters that cannot stand for themselves in a pattern.
const METACHARS: &[u8] = b".^$*?+|()[{";

fn is_ordinary(byte: u8) -> bool {
    !METACHARS.contains(&byte)
}

/// Parses a pattern string into a [`Pattern`] tree.
///
/// The whole string must be consumed; trailing input is an error.
///
/// # Examples
///
/// ```
/// let mut pattern = spanre::parse("an").unwrap();
///
/// pattern.locate(b"banana");
///
/// let spans: Vec<_> = pattern
///     .matching_spans()
///     .map(|span| (span.start(), span.end()))
///     .collect();
///
/// assert_eq!(spans, vec![(1, 3), (3, 5)]);
/// ```
///
/// Malformed patterns are rejected with a typed error:
///
/// ```
/// assert!(spanre::parse("(never closed").is_err());
/// ```
pub fn parse(pattern: &str) -> Result<Pattern, Error> {
    let mut parser = Parser::new(pattern.as_bytes());
    let node = parser.alternation()?;
    // The productions stop only at the end of the pattern or at a `)` that
    // closes no group.
    if parser.peek().is_some() {
        return Err(Error::UnmatchedCloseParen { offset: parser.pos });
    }
    debug!("parsed pattern `{}`", pattern);
    Ok(node)
}

struct Parser<'src> {
    pattern: &'src [u8],
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(pattern: &'src [u8]) -> Self {
        Self { pattern, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.pattern.get(self.pos).copied()
    }

    fn bump_if(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn alternation(&mut self) -> Result<Pattern, Error> {
        let mut node = self.concatenation()?;
        while self.bump_if(b'|') {
            let next = self.concatenation()?;
            node = Pattern::alternation(node, next);
        }
        Ok(node)
    }

    fn concatenation(&mut self) -> Result<Pattern, Error> {
        let mut node = self.repetition()?;
        while let Some(byte) = self.peek() {
            if byte == b'|' || byte == b')' {
                break;
            }
            let next = self.repetition()?;
            node = Pattern::concat(node, next);
        }
        Ok(node)
    }

    fn repetition(&mut self) -> Result<Pattern, Error> {
        let mut node = self.atomic()?;
        loop {
            let quantifier = match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    Quantifier::ZeroOrMore
                }
                Some(b'+') => {
                    self.pos += 1;
                    Quantifier::OneOrMore
                }
                Some(b'?') => {
                    self.pos += 1;
                    Quantifier::ZeroOrOne
                }
                Some(b'{') => self.bound()?,
                _ => break,
            };
            node = Pattern::repetition(node, quantifier);
        }
        Ok(node)
    }

    fn atomic(&mut self) -> Result<Pattern, Error> {
        match self.peek() {
            Some(b'.') => {
                self.pos += 1;
                Ok(Pattern::metachar(Metachar::Any))
            }
            Some(b'^') => {
                self.pos += 1;
                Ok(Pattern::metachar(Metachar::Start))
            }
            Some(b'$') => {
                self.pos += 1;
                Ok(Pattern::metachar(Metachar::End))
            }
            Some(b'[') => self.char_class(),
            Some(b'(') => {
                let open = self.pos;
                self.pos += 1;
                let node = self.alternation()?;
                if !self.bump_if(b')') {
                    return Err(Error::UnclosedGroup { offset: open });
                }
                Ok(node)
            }
            Some(byte) if is_ordinary(byte) => {
                self.pos += 1;
                Ok(Pattern::symbol(byte))
            }
            Some(byte) => Err(Error::UnexpectedChar {
                found: byte as char,
                offset: self.pos,
            }),
            None => Err(Error::UnexpectedEnd),
        }
    }

    fn char_class(&mut self) -> Result<Pattern, Error> {
        let open = self.pos;
        self.pos += 1;
        let body_start = self.pos;
        // The first `]` closes the class only when at least one body
        // character precedes it, so `[]]` is the class containing `]` and
        // `[]` runs off the end of the pattern.
        while let Some(byte) = self.peek() {
            if byte == b']' && self.pos > body_start {
                break;
            }
            self.pos += 1;
        }
        if self.peek().is_none() {
            return Err(Error::UnclosedClass { offset: open });
        }
        let body = &self.pattern[body_start..self.pos];
        let class = class_from_body(body, body_start)?;
        self.pos += 1;
        Ok(Pattern::class(class))
    }

    fn bound(&mut self) -> Result<Quantifier, Error> {
        let open = self.pos;
        self.pos += 1;
        let min = self.number(open)?;
        if !self.bump_if(b',') {
            return Err(Error::InvalidBound { offset: open });
        }
        let max = self.number(open)?;
        if !self.bump_if(b'}') {
            return Err(Error::InvalidBound { offset: open });
        }
        if min.is_none() && max.is_none() {
            return Err(Error::InvalidBound { offset: open });
        }
        let min = min.unwrap_or(0);
        if let Some(max) = max {
            if min > max {
                return Err(Error::ReversedBound { min, max, offset: open });
            }
        }
        Ok(Quantifier::Bounded { min, max })
    }

    /// Parses a run of decimal digits; `None` when no digit is present.
    fn number(&mut self, bound_offset: usize) -> Result<Option<usize>, Error> {
        let mut digits = 0;
        let mut value: usize = 0;
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_digit() {
                break;
            }
            self.pos += 1;
            digits += 1;
            value = value
                .checked_mul(10)
                .and_then(|value| value.checked_add((byte - b'0') as usize))
                .ok_or(Error::InvalidBound { offset: bound_offset })?;
        }
        if digits == 0 {
            return Ok(None);
        }
        Ok(Some(value))
    }
}

/// Builds a [`CharClass`] from the raw class body, the characters between
/// `[` and `]`. `offset` is the body's position within the whole pattern,
/// used in errors.
fn class_from_body(body: &[u8], offset: usize) -> Result<CharClass, Error> {
    // A leading `^` negates the class, unless it is the body's only
    // character, in which case it stands for itself.
    let (negated, rest, rest_offset) = if body.len() > 1 && body[0] == b'^' {
        (true, &body[1..], offset + 1)
    } else {
        (false, body, offset)
    };

    let mut terms = Vec::new();
    let mut pos = 0;

    while pos < rest.len() {
        // `X-Y` forms a range only when another character follows the `-`;
        // a `-` at the start or end of the body is a literal.
        if pos + 2 < rest.len() && rest[pos + 1] == b'-' {
            let (start, end) = (rest[pos], rest[pos + 2]);
            if start > end {
                return Err(Error::InvalidRange {
                    start: start as char,
                    end: end as char,
                    offset: rest_offset + pos,
                });
            }
            terms.push(ClassTerm::Range(start, end));
            pos += 3;
        } else {
            terms.push(ClassTerm::Literal(rest[pos]));
            pos += 1;
        }
    }

    Ok(CharClass::new(negated, terms))
}
