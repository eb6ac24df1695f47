//! Compile Log Parsing
//!
//! Drivers report error positions in one of three shapes:
//!
//! | Shape | Example |
//! |---|---|
//! | colon | `ERROR: 0:12: 'x' : undeclared identifier` |
//! | paren | `0(12) : error C1008: undefined variable "x"` |
//! | column | `0:12(5): error: syntax error, unexpected IDENTIFIER` |
//!
//! The first number is the index of the submitted source string, the second
//! the line. Whether the line counts from that string or from the start of
//! the compilation unit is a property of the backend.

/// Position of the first error in a compile log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLocation {
    pub string_index: usize,
    pub line: usize,
}

#[must_use]
pub fn first_error_location(log: &str) -> Option<LogLocation> {
    log.lines()
        .find_map(|line| {
            parse_colon_form(line)
                .or_else(|| parse_paren_form(line))
                .or_else(|| parse_column_form(line))
        })
}

fn parse_colon_form(line: &str) -> Option<LogLocation> {
    let line = line.trim_start();
    let rest = line
        .strip_prefix("ERROR:")
        .or_else(|| line.strip_prefix("error:"))?;
    let mut parts = rest.splitn(3, ':');
    let string_index = parts.next()?.trim().parse().ok()?;
    let line = parts.next()?.trim().parse().ok()?;
    Some(LogLocation { string_index, line })
}

fn parse_paren_form(line: &str) -> Option<LogLocation> {
    let (index, rest) = line.trim_start().split_once('(')?;
    let (number, tail) = rest.split_once(')')?;
    if !tail.to_ascii_lowercase().contains("error") {
        return None;
    }
    Some(LogLocation {
        string_index: index.trim().parse().ok()?,
        line: number.trim().parse().ok()?,
    })
}

fn parse_column_form(line: &str) -> Option<LogLocation> {
    let (index, rest) = line.trim_start().split_once(':')?;
    let (number, rest) = rest.split_once('(')?;
    let (column, tail) = rest.split_once(')')?;
    column.trim().parse::<usize>().ok()?;
    if !tail.trim_start_matches(':').trim_start().to_ascii_lowercase().starts_with("error") {
        return None;
    }
    Some(LogLocation {
        string_index: index.trim().parse().ok()?,
        line: number.trim().parse().ok()?,
    })
}

/// Converts a string-relative line into a line of the whole unit.
#[must_use]
pub fn unit_line(strings: &[&str], location: LogLocation) -> usize {
    let preceding: usize = strings
        .iter()
        .take(location.string_index)
        .map(|s| s.bytes().filter(|b| *b == b'\n').count())
        .sum();
    preceding + location.line
}
