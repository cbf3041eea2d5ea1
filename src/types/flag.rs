use std::fmt;

/// The closed set of recognized rule and condition flag keywords.
///
/// Every keyword (long or short alias, case-insensitive) maps to exactly one
/// kind. Most kinds only affect the surrounding rewrite pipeline and are
/// carried as parsed data; the engine itself acts on two of them:
/// [`OrNext`](FlagKind::OrNext) (condition OR-combinator) and
/// [`NoCase`](FlagKind::NoCase) (case-insensitive pattern matching).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Before,
    Chain,
    Cookie,
    DiscardPath,
    Env,
    Forbidden,
    Gone,
    Handler,
    Last,
    Next,
    NoCase,
    NoEscape,
    NoSubRequests,
    OrNext,
    PassThrough,
    Proxy,
    QsAppend,
    Redirect,
    Skip,
    Type,
}

impl FlagKind {
    /// Look a keyword up in the alias table. Keywords are matched
    /// case-insensitively; both the long and the short alias are accepted.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<FlagKind> {
        let kind = match keyword.to_ascii_lowercase().as_str() {
            "b" => FlagKind::Before,
            "chain" | "c" => FlagKind::Chain,
            "cookie" | "co" => FlagKind::Cookie,
            "discardpath" | "dpi" => FlagKind::DiscardPath,
            "env" | "e" => FlagKind::Env,
            "forbidden" | "f" => FlagKind::Forbidden,
            "gone" | "g" => FlagKind::Gone,
            "handler" | "h" => FlagKind::Handler,
            "last" | "l" => FlagKind::Last,
            "next" | "n" => FlagKind::Next,
            "nocase" | "nc" => FlagKind::NoCase,
            "noescape" | "ne" => FlagKind::NoEscape,
            "nosubreqs" | "ns" => FlagKind::NoSubRequests,
            "ornext" | "or" => FlagKind::OrNext,
            "passthrough" | "pt" => FlagKind::PassThrough,
            "proxy" | "p" => FlagKind::Proxy,
            "qsappend" | "qsa" => FlagKind::QsAppend,
            "redirect" | "r" => FlagKind::Redirect,
            "skip" | "s" => FlagKind::Skip,
            "type" | "t" => FlagKind::Type,
            _ => return None,
        };
        Some(kind)
    }

    /// The canonical (long) keyword for this kind.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            FlagKind::Before => "b",
            FlagKind::Chain => "chain",
            FlagKind::Cookie => "cookie",
            FlagKind::DiscardPath => "discardpath",
            FlagKind::Env => "env",
            FlagKind::Forbidden => "forbidden",
            FlagKind::Gone => "gone",
            FlagKind::Handler => "handler",
            FlagKind::Last => "last",
            FlagKind::Next => "next",
            FlagKind::NoCase => "nocase",
            FlagKind::NoEscape => "noescape",
            FlagKind::NoSubRequests => "nosubreqs",
            FlagKind::OrNext => "ornext",
            FlagKind::PassThrough => "passthrough",
            FlagKind::Proxy => "proxy",
            FlagKind::QsAppend => "qsappend",
            FlagKind::Redirect => "redirect",
            FlagKind::Skip => "skip",
            FlagKind::Type => "type",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// An immutable modifier attached to a rule or condition.
///
/// Flags carrying a structured payload (e.g. `cookie=NAME:VALUE` or
/// `E=VAR:VAL`) keep the part before the first `:` in `key` and the
/// remainder in `value`; a payload without a `:` is stored as `value` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    kind: FlagKind,
    key: Option<String>,
    value: Option<String>,
}

impl Flag {
    #[must_use]
    pub fn new(kind: FlagKind, key: Option<String>, value: Option<String>) -> Self {
        Self { kind, key, value }
    }

    #[must_use]
    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match (&self.key, &self.value) {
            (Some(key), Some(value)) => write!(f, "={key}:{value}"),
            (None, Some(value)) => write!(f, "={value}"),
            _ => Ok(()),
        }
    }
}
