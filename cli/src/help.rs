pub const PATTERN_LONG_HELP: &str = r#"Pattern to search for

Supported syntax:

a      matches the character `a`. Any character outside the set
       `. ^ $ * ? + | ( ) [ {` stands for itself.

.      matches any single character.

^      matches the empty string at the start of a line.

$      matches the empty string at the end of a line.

[abc]  matches one character listed in the class. Classes support `a-z`
       ranges and leading-`^` negation, e.g. `[^0-9]`.

p|q    matches what `p` matches; when `p` matches nowhere in the line,
       matches what `q` matches instead.

p*     matches zero or more consecutive `p` matches.

p+     matches one or more consecutive `p` matches.

p?     matches zero or one `p` match.

p{m,n} matches between `m` and `n` consecutive `p` matches. One side of
       the bound may be omitted: `{m,}` and `{,n}`.

(p)    grouping.

Examples:

spanre 'ba(na)*' fruits.txt
spanre '^[A-Z][a-z]+$' < words.txt"#;

pub const FILE_LONG_HELP: &str = r#"File to search

When omitted, lines are read from stdin."#;

pub const DUMP_TREE_LONG_HELP: &str = r#"Print the parsed pattern as a tree and exit

No input is read. Useful for checking how quantifiers, concatenations and
alternations nest in a pattern.

Example:

spanre --dump-tree 'a(b|c)*'"#;
