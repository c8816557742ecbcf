mod help;

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use bstr::io::BufReadExt;
use bstr::BStr;
use clap::{arg, command, value_parser, ArgMatches, Command};
use crossterm::tty::IsTty;
use log::debug;
use yansi::Color::Red;
use yansi::Paint;

use spanre::Pattern;

const APP_HELP_TEMPLATE: &str = r#"spanre {version}, prints lines matching a pattern.

{before-help}{usage-heading}
  {usage}

{all-args}{after-help}
"#;

const EXIT_ERROR: i32 = 1;

fn main() -> anyhow::Result<()> {
    // Enable support for ANSI escape codes in Windows. In other platforms
    // this is a no-op.
    if let Err(err) = enable_ansi_support::enable_ansi_support() {
        println!("could not enable ANSI support: {}", err)
    }

    #[cfg(feature = "logging")]
    env_logger::init();

    // If stdout is not a tty (for example, because it was redirected to a
    // file) turn off colors. This way you can redirect the output to a file
    // without ANSI escape codes messing up the file content.
    if !io::stdout().is_tty() {
        yansi::disable();
    }

    let args = cli().get_matches();

    if let Err(err) = exec_scan(&args) {
        if let Some(source) = err.source() {
            eprintln!("{} {}: {}", "error:".paint(Red).bold(), err, source);
        } else {
            eprintln!("{} {}", "error:".paint(Red).bold(), err);
        }
        process::exit(EXIT_ERROR);
    }

    Ok(())
}

fn cli() -> Command {
    command!()
        .about("Prints lines matching a pattern, highlighting every matched span")
        .arg_required_else_help(true)
        .help_template(APP_HELP_TEMPLATE)
        .arg(
            arg!(<PATTERN> "Pattern to search for")
                .long_help(help::PATTERN_LONG_HELP),
        )
        .arg(
            arg!([FILE] "File to search, stdin when omitted")
                .value_parser(value_parser!(PathBuf))
                .long_help(help::FILE_LONG_HELP),
        )
        .arg(
            arg!(--"dump-tree" "Print the parsed pattern as a tree and exit")
                .long_help(help::DUMP_TREE_LONG_HELP),
        )
}

fn exec_scan(args: &ArgMatches) -> anyhow::Result<()> {
    let pattern = args.get_one::<String>("PATTERN").unwrap();
    let file = args.get_one::<PathBuf>("FILE");

    let mut pattern = spanre::parse(pattern).context("Invalid pattern")?;

    if args.get_flag("dump-tree") {
        let mut output = String::new();
        ascii_tree::write_tree(&mut output, &pattern.ascii_tree())?;
        println!("{}", output);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("can not open `{}`", path.display()))?;
            scan_lines(BufReader::new(file), &mut pattern, &mut output)
        }
        None => scan_lines(io::stdin().lock(), &mut pattern, &mut output),
    }
}

/// Locates the pattern in every line of `reader` and prints the matching
/// lines to `output`, highlighting the matched spans.
fn scan_lines<R, W>(
    mut reader: R,
    pattern: &mut Pattern,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = 0_usize;
    let mut matching = 0_usize;

    reader.for_byte_line(|line| {
        lines += 1;
        pattern.locate(line);
        if pattern.has_matches() {
            matching += 1;
            print_highlighted(output, line, pattern)?;
        }
        Ok(true)
    })?;

    debug!("{} of {} lines matched", matching, lines);

    Ok(())
}

/// Prints `line` with every byte covered by some matching span painted red.
///
/// Empty spans cover no bytes, so a line whose only matches are empty is
/// printed without any highlight.
fn print_highlighted<W: Write>(
    output: &mut W,
    line: &[u8],
    pattern: &Pattern,
) -> io::Result<()> {
    let mask = coverage_mask(pattern, line.len());
    let mut pos = 0;
    while pos < line.len() {
        let start = pos;
        let covered = mask[pos];
        while pos < line.len() && mask[pos] == covered {
            pos += 1;
        }
        let chunk = BStr::new(&line[start..pos]);
        if covered {
            write!(output, "{}", chunk.paint(Red))?;
        } else {
            write!(output, "{}", chunk)?;
        }
    }
    writeln!(output)
}

/// Returns one flag per byte of the input, true where some matching span
/// covers the byte.
fn coverage_mask(pattern: &Pattern, len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    for span in pattern.matching_spans() {
        for covered in &mut mask[span.range()] {
            *covered = true;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::{cli, coverage_mask, exec_scan, print_highlighted, scan_lines};

    fn located(pattern: &str, line: &[u8]) -> spanre::Pattern {
        let mut pattern = spanre::parse(pattern).unwrap();
        pattern.locate(line);
        pattern
    }

    #[test]
    fn mask_covers_every_matched_span() {
        let pattern = located("an", b"banana");
        assert_eq!(
            coverage_mask(&pattern, 6),
            vec![false, true, true, true, true, false]
        );
    }

    #[test]
    fn mask_merges_overlapping_spans() {
        // `a+` matches (0,1), (0,2), (1,2) and more; coverage is the union.
        let pattern = located("a+", b"aab");
        assert_eq!(coverage_mask(&pattern, 3), vec![true, true, false]);
    }

    #[test]
    fn mask_ignores_empty_spans() {
        let pattern = located("^", b"ab");
        assert!(pattern.has_matches());
        assert_eq!(coverage_mask(&pattern, 2), vec![false, false]);
    }

    #[test]
    fn highlighted_output_preserves_line_bytes() {
        // With colors disabled the output is the line itself.
        yansi::disable();
        let pattern = located("an", b"banana");
        let mut output = Vec::new();
        print_highlighted(&mut output, b"banana", &pattern).unwrap();
        assert_eq!(output, b"banana\n".to_vec());
    }

    #[test]
    fn scan_prints_only_matching_lines() {
        yansi::disable();
        let input = io::Cursor::new(&b"banana\nmelon\nana\n"[..]);
        let mut pattern = spanre::parse("an").unwrap();
        let mut output = Vec::new();
        scan_lines(input, &mut pattern, &mut output).unwrap();
        assert_eq!(output, b"banana\nana\n".to_vec());
    }

    #[test]
    fn empty_matches_print_the_line_unhighlighted() {
        yansi::disable();
        let input = io::Cursor::new(&b"xyz\n\n"[..]);
        let mut pattern = spanre::parse("b*").unwrap();
        let mut output = Vec::new();
        scan_lines(input, &mut pattern, &mut output).unwrap();
        assert_eq!(output, b"xyz\n\n".to_vec());
    }

    #[test]
    fn lines_without_matches_are_skipped() {
        yansi::disable();
        let input = io::Cursor::new(&b"one\ntwo\nthree\n"[..]);
        let mut pattern = spanre::parse("t.o").unwrap();
        let mut output = Vec::new();
        scan_lines(input, &mut pattern, &mut output).unwrap();
        assert_eq!(output, b"two\n".to_vec());
    }

    #[test]
    fn invalid_pattern_diagnostic() {
        let args = cli().try_get_matches_from(["spanre", "(a"]).unwrap();
        let err = exec_scan(&args).unwrap_err();
        assert_eq!(err.to_string(), "Invalid pattern");
        assert_eq!(
            err.source().map(|source| source.to_string()),
            Some("unclosed group, `(` at offset 0".to_string())
        );
    }
}
