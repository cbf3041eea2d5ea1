//! Parsing of directive value text into compiled policy pieces.
//!
//! The surrounding config system tokenizes directive lines; these functions
//! consume the already-split values: a bracketed flag string, the text after
//! `allow`/`deny`, and the `order` keyword.

mod grammar;

use winnow::Parser;

use crate::types::{AccessEntry, ConfigError, Flag, FlagKind, IpSpec, OrderMode};

/// Parse a bracketed, comma-separated flag string such as `[NC,L]` or
/// `[cookie=NAME:VALUE]`. Empty input yields an empty list.
///
/// # Errors
///
/// [`ConfigError::UnbracketedFlags`] when non-empty input is not wrapped in
/// `[` and `]`, [`ConfigError::FlagSyntax`] when the inner list is
/// malformed, and [`ConfigError::UnknownFlag`] for a keyword outside the
/// alias table.
pub fn flags(input: &str) -> Result<Vec<Flag>, ConfigError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let inner = input
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ConfigError::UnbracketedFlags {
            input: input.to_owned(),
        })?;

    let raw = grammar::flag_list
        .parse(inner)
        .map_err(|e| ConfigError::FlagSyntax {
            input: input.to_owned(),
            message: e.to_string(),
        })?;

    raw.into_iter()
        .map(|raw| {
            let kind = FlagKind::from_keyword(&raw.keyword).ok_or(ConfigError::UnknownFlag {
                keyword: raw.keyword,
            })?;
            Ok(Flag::new(kind, raw.key, raw.value))
        })
        .collect()
}

/// Parse an `allow`/`deny` directive value: the word `from` followed by
/// whitespace-separated items, each becoming one [`AccessEntry`] in input
/// order. `directive` is only used in error messages.
///
/// # Errors
///
/// [`ConfigError::MissingFrom`] when the line does not start with `from`,
/// or [`ConfigError::InvalidIpSpec`] for an unparsable subnet item.
pub fn entries(directive: &str, line: &str) -> Result<Vec<AccessEntry>, ConfigError> {
    let line = line.trim();
    let rest = match line.split_once(char::is_whitespace) {
        Some((first, rest)) if first.eq_ignore_ascii_case("from") => rest,
        _ => {
            return Err(ConfigError::MissingFrom {
                directive: directive.to_owned(),
            })
        }
    };

    rest.split_whitespace().map(classify).collect()
}

/// Classify one item. The checks shadow each other in this order: `all`,
/// `env=!`, `env=`, subnet, dotted address, hostname.
fn classify(token: &str) -> Result<AccessEntry, ConfigError> {
    if token == "all" {
        return Ok(AccessEntry::All);
    }
    // env=! must be checked before env=.
    if let Some(name) = token.strip_prefix("env=!") {
        return Ok(AccessEntry::EnvAbsent(name.to_owned()));
    }
    if let Some(name) = token.strip_prefix("env=") {
        return Ok(AccessEntry::EnvPresent(name.to_owned()));
    }
    if token.contains('/') {
        return IpSpec::parse(token).map(AccessEntry::IpMatch);
    }
    if token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return IpSpec::parse(token).map(AccessEntry::IpMatch);
    }
    Ok(AccessEntry::HostMatch(token.to_owned()))
}

/// Parse an `order` directive value. Exact string comparison, so no
/// whitespace is tolerated around the comma.
///
/// # Errors
///
/// [`ConfigError::UnknownOrder`] for anything else.
pub fn order(value: &str) -> Result<OrderMode, ConfigError> {
    match value {
        "allow,deny" => Ok(OrderMode::AllowThenDeny),
        "deny,allow" => Ok(OrderMode::DenyThenAllow),
        "mutual-failure" => Ok(OrderMode::MutualFailure),
        _ => Err(ConfigError::UnknownOrder {
            value: value.to_owned(),
        }),
    }
}
