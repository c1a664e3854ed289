//! printf-style placeholder substitution for message templates.
//!
//! Supports `%s` (next argument), `%N$s` (argument N, 1-based) and `%%`.
//! A placeholder with no matching argument is left in the output untouched.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%|%(?:(\d+)\$)?s").expect("Invalid placeholder regex"));

/// Substitute `args` into `template`.
pub fn sprintf(template: &str, args: &[&str]) -> String {
    if args.is_empty() && !template.contains("%%") {
        return template.to_string();
    }

    let mut next = 0usize;
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let whole = &caps[0];
            if whole == "%%" {
                return "%".to_string();
            }
            let arg = match caps.get(1) {
                Some(pos) => pos
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| args.get(i)),
                None => {
                    let arg = args.get(next);
                    next += 1;
                    arg
                }
            };
            arg.map(|a| a.to_string()).unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
}
