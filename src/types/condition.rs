use regex::RegexBuilder;

use super::context::RequestContext;
use super::error::ConfigError;
use super::flag::{Flag, FlagKind};

/// A single rewrite condition: one predicate test bound to a request
/// variable.
///
/// The pattern is compiled at construction time; a leading `!` negates the
/// test, and a [`NoCase`](FlagKind::NoCase) flag makes it case-insensitive.
/// Conditions are attached to a [`Rule`](super::Rule) with
/// [`Rule::add_condition()`](super::Rule::add_condition), which records the
/// condition's slot in the owning rule.
#[derive(Debug, Clone)]
pub struct Condition {
    test_variable: String,
    regex: regex::Regex,
    negate: bool,
    flags: Vec<Flag>,
    owner: Option<usize>,
}

impl Condition {
    /// Build a condition from directive text: the test variable, the pattern
    /// (optionally prefixed with `!`), and a bracketed flag string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on a malformed flag string or an invalid
    /// pattern.
    pub fn new(test_variable: &str, pattern: &str, flags: &str) -> Result<Self, ConfigError> {
        let flags = crate::parse::flags(flags)?;
        let (pattern, negate) = match pattern.strip_prefix('!') {
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
        Ok(Self {
            test_variable: test_variable.to_owned(),
            regex,
            negate,
            flags,
            owner: None,
        })
    }

    /// Evaluate this condition against the request context.
    ///
    /// The test variable is resolved through
    /// [`RequestContext::variable()`]; an unresolvable variable expands to
    /// the empty string.
    #[must_use]
    pub fn matches(&self, ctx: &RequestContext) -> bool {
        let value = ctx.variable(&self.test_variable).unwrap_or_default();
        self.regex.is_match(&value) != self.negate
    }

    #[must_use]
    pub fn test_variable(&self) -> &str {
        &self.test_variable
    }

    /// The pattern text with any leading `!` stripped.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn negate(&self) -> bool {
        self.negate
    }

    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Whether any of this condition's flags is of the given kind.
    #[must_use]
    pub fn has_flag(&self, kind: FlagKind) -> bool {
        self.flags.iter().any(|f| f.kind() == kind)
    }

    /// The condition's slot in its owning rule's condition list, once
    /// attached. The association is an index, not a reference, so a
    /// condition never extends its rule's lifetime.
    #[must_use]
    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, index: usize) {
        self.owner = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("127.0.0.1".parse().unwrap())
            .with_hostname("www.example.com")
            .with_env("APP_MODE", "prod")
            .with_var("HTTP_USER_AGENT", "Mozilla/5.0")
    }

    #[test]
    fn plain_match() {
        let cond = Condition::new("HTTP_USER_AGENT", "^Mozilla", "").unwrap();
        assert!(cond.matches(&ctx()));
    }

    #[test]
    fn negated_pattern() {
        let cond = Condition::new("HTTP_USER_AGENT", "!^Mozilla", "").unwrap();
        assert_eq!(cond.pattern(), "^Mozilla");
        assert!(cond.negate());
        assert!(!cond.matches(&ctx()));
    }

    #[test]
    fn nocase_flag_makes_match_case_insensitive() {
        let cond = Condition::new("HTTP_USER_AGENT", "^mozilla", "[NC]").unwrap();
        assert!(cond.matches(&ctx()));

        let sensitive = Condition::new("HTTP_USER_AGENT", "^mozilla", "").unwrap();
        assert!(!sensitive.matches(&ctx()));
    }

    #[test]
    fn remote_addr_and_host_variables() {
        let cond = Condition::new("REMOTE_ADDR", "^127\\.", "").unwrap();
        assert!(cond.matches(&ctx()));

        let cond = Condition::new("REMOTE_HOST", "example\\.com$", "").unwrap();
        assert!(cond.matches(&ctx()));
    }

    #[test]
    fn env_variable_lookup() {
        let cond = Condition::new("ENV:APP_MODE", "^prod$", "").unwrap();
        assert!(cond.matches(&ctx()));

        let cond = Condition::new("ENV:MISSING", "^prod$", "").unwrap();
        assert!(!cond.matches(&ctx()));
    }

    #[test]
    fn unresolved_variable_expands_to_empty_string() {
        // "^$" matches the empty expansion; a negated non-empty pattern does too.
        let cond = Condition::new("NO_SUCH_VAR", "^$", "").unwrap();
        assert!(cond.matches(&ctx()));

        let cond = Condition::new("NO_SUCH_VAR", "!.+", "").unwrap();
        assert!(cond.matches(&ctx()));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let err = Condition::new("REMOTE_ADDR", "[unclosed", "").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn or_flag_is_visible() {
        let cond = Condition::new("REMOTE_ADDR", ".", "[OR]").unwrap();
        assert!(cond.has_flag(FlagKind::OrNext));
        assert!(!cond.has_flag(FlagKind::NoCase));
    }

    #[test]
    fn owner_unset_until_attached() {
        let cond = Condition::new("REMOTE_ADDR", ".", "").unwrap();
        assert_eq!(cond.owner(), None);
    }
}
