use std::cell::OnceCell;

use regex::RegexBuilder;

use super::condition::Condition;
use super::context::RequestContext;
use super::error::ConfigError;
use super::flag::{Flag, FlagKind};
use crate::trace::{NoopTrace, Trace};

/// What a rule rewrites a matching request into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Literal `-`: keep the request untouched.
    None,
    /// Any other value, stored verbatim.
    Text(String),
}

/// A rewrite directive's compiled form: pattern, substitution, flags, and an
/// ordered list of conditions.
///
/// `matches()` is memoized per instance: the first call evaluates the
/// condition chain and every later call returns the cached result, so
/// non-deterministic conditions stay stable within one request. Give each
/// request a fresh cache scope by cloning the rule and calling
/// [`reset_match_cache()`](Rule::reset_match_cache), or by constructing a
/// new instance.
#[derive(Debug, Clone)]
pub struct Rule {
    regex: regex::Regex,
    pattern_negate: bool,
    substitution: Substitution,
    flags: Vec<Flag>,
    conditions: Vec<Condition>,
    match_cache: OnceCell<bool>,
}

impl Rule {
    /// Build a rule from directive text: the pattern (optionally prefixed
    /// with `!`), the substitution, and a bracketed flag string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on a malformed flag string or an invalid
    /// pattern.
    pub fn new(pattern: &str, substitution: &str, flags: &str) -> Result<Self, ConfigError> {
        let flags = crate::parse::flags(flags)?;
        let (pattern, pattern_negate) = match pattern.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (pattern, false),
        };
        let nocase = flags.iter().any(|f| f.kind() == FlagKind::NoCase);
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(nocase)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })?;
        let substitution = if substitution == "-" {
            Substitution::None
        } else {
            Substitution::Text(substitution.to_owned())
        };
        Ok(Self {
            regex,
            pattern_negate,
            substitution,
            flags,
            conditions: Vec::new(),
            match_cache: OnceCell::new(),
        })
    }

    /// Attach a condition, preserving declaration order. The condition's
    /// owner slot is set so its evaluation can be tied back to this rule.
    pub fn add_condition(&mut self, mut condition: Condition) {
        condition.set_owner(self.conditions.len());
        self.conditions.push(condition);
    }

    /// Whether this rule's conditions hold for the given request.
    ///
    /// Memoized: conditions are evaluated at most once per instance.
    #[must_use]
    pub fn matches(&self, ctx: &RequestContext) -> bool {
        self.matches_traced(ctx, &mut NoopTrace)
    }

    /// Same as [`matches()`](Rule::matches), reporting each condition
    /// evaluation to the given observer. A call that hits the cache reports
    /// nothing.
    #[must_use]
    pub fn matches_traced(&self, ctx: &RequestContext, observer: &mut dyn Trace) -> bool {
        *self
            .match_cache
            .get_or_init(|| crate::evaluate::rule_matches(self, ctx, observer))
    }

    /// Clear the memoized match so the next `matches()` call re-evaluates.
    /// Required between requests when an instance is reused.
    pub fn reset_match_cache(&mut self) {
        self.match_cache = OnceCell::new();
    }

    /// Apply the rule pattern (with negation) to an input, typically the
    /// request URI.
    #[must_use]
    pub fn pattern_matches(&self, input: &str) -> bool {
        self.regex.is_match(input) != self.pattern_negate
    }

    /// The pattern text with any leading `!` stripped.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn pattern_negate(&self) -> bool {
        self.pattern_negate
    }

    #[must_use]
    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether any of this rule's flags is of the given kind.
    #[must_use]
    pub fn has_flag(&self, kind: FlagKind) -> bool {
        self.flags.iter().any(|f| f.kind() == kind)
    }
}
