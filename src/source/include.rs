/// Keywords accepted after `#`. Both spell the same textual inclusion.
const INCLUDE_KEYWORDS: [&str; 2] = ["include", "import"];

/// Returns the included name if `line` is an include directive.
///
/// Accepts `#include "name"`, `#include <name>` and the `#import`
/// spelling, with optional whitespace after the `#`. Anything after the
/// closing delimiter is ignored.
#[must_use]
pub fn parse_include_directive(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    let rest = INCLUDE_KEYWORDS
        .iter()
        .find_map(|keyword| rest.strip_prefix(keyword))?;

    // `#includefoo` is not a directive
    if !rest.starts_with(|c: char| c.is_whitespace() || c == '"' || c == '<') {
        return None;
    }

    let rest = rest.trim_start();
    let close = match rest.chars().next()? {
        '"' => '"',
        '<' => '>',
        _ => return None,
    };
    let body = &rest[1..];
    let end = body.find(close)?;
    let name = body[..end].trim();
    (!name.is_empty()).then_some(name)
}
