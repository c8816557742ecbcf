use ascii_tree::Tree;

use crate::pattern::{Pattern, PatternKind};

/// Returns a representation of the pattern as an ASCII tree.
pub(crate) fn pattern_ascii_tree(pattern: &Pattern) -> Tree {
    match pattern.kind() {
        PatternKind::Symbol(symbol) => {
            Tree::Leaf(vec![format!("symbol `{}`", *symbol as char)])
        }
        PatternKind::Metachar(metachar) => {
            Tree::Leaf(vec![format!("metachar `{}`", metachar)])
        }
        PatternKind::Class(class) => {
            Tree::Leaf(vec![format!("class `{}`", class)])
        }
        PatternKind::Concat(first, second) => Tree::Node(
            "concat".to_string(),
            vec![pattern_ascii_tree(first), pattern_ascii_tree(second)],
        ),
        PatternKind::Alternation(preferred, fallback) => Tree::Node(
            "alternation".to_string(),
            vec![pattern_ascii_tree(preferred), pattern_ascii_tree(fallback)],
        ),
        PatternKind::Repetition(child, quantifier) => Tree::Node(
            format!("repetition `{}`", quantifier),
            vec![pattern_ascii_tree(child)],
        ),
    }
}
