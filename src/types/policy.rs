use std::fmt;

use super::context::RequestContext;
use super::decision::Decision;
use super::entry::AccessEntry;
use super::error::ConfigError;
use crate::trace::{NoopTrace, Trace};

/// Strategy for combining the allow-list and deny-list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// `order allow,deny`: start denied, allow can grant, deny overrides.
    AllowThenDeny,
    /// `order deny,allow`: start granted, deny revokes, allow overrides.
    DenyThenAllow,
    /// `order mutual-failure`: granted only when allowed and not denied.
    MutualFailure,
}

/// Whether all authorization stages must pass or any one passing suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatisfyMode {
    All,
    Any,
}

/// A compiled access policy: ordered allow/deny entry lists plus the order
/// and satisfy modes.
///
/// Policies are built once at directive-parse time via
/// [`AccessPolicy::builder()`] and evaluated per request with
/// [`check_access()`](AccessPolicy::check_access). Evaluation takes `&self`;
/// a policy can be shared freely across concurrently processed requests.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allow: Vec<AccessEntry>,
    deny: Vec<AccessEntry>,
    order: OrderMode,
    satisfy: SatisfyMode,
}

impl Default for AccessPolicy {
    /// Directive defaults: `deny,allow` order, empty lists, satisfy all.
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            deny: Vec::new(),
            order: OrderMode::DenyThenAllow,
            satisfy: SatisfyMode::All,
        }
    }
}

impl AccessPolicy {
    #[must_use]
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder {
            policy: AccessPolicy::default(),
        }
    }

    #[must_use]
    pub fn allow(&self) -> &[AccessEntry] {
        &self.allow
    }

    #[must_use]
    pub fn deny(&self) -> &[AccessEntry] {
        &self.deny
    }

    #[must_use]
    pub fn order(&self) -> OrderMode {
        self.order
    }

    #[must_use]
    pub fn satisfy(&self) -> SatisfyMode {
        self.satisfy
    }

    /// Evaluate this policy against a request, returning the terminal
    /// [`Decision`] and recording it on the context.
    ///
    /// A [`Forbidden`](Decision::Forbidden) decision is a normal outcome;
    /// the caller, not this engine, terminates the request.
    pub fn check_access(&self, ctx: &mut RequestContext) -> Decision {
        self.check_access_traced(ctx, &mut NoopTrace)
    }

    /// Same as [`check_access()`](AccessPolicy::check_access), reporting
    /// each entry evaluation to the given observer.
    pub fn check_access_traced(
        &self,
        ctx: &mut RequestContext,
        observer: &mut dyn Trace,
    ) -> Decision {
        crate::evaluate::check_access(self, ctx, observer)
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccessPolicy({} allow, {} deny, {:?}, satisfy {:?})",
            self.allow.len(),
            self.deny.len(),
            self.order,
            self.satisfy,
        )
    }
}

/// Builder collecting access directives into an [`AccessPolicy`].
///
/// The `allow`, `deny`, and `order` methods take the directive value text
/// exactly as the config dispatcher hands it over.
///
/// # Example
///
/// ```
/// use htgate::{AccessPolicy, SatisfyMode};
///
/// let policy = AccessPolicy::builder()
///     .order("deny,allow").unwrap()
///     .deny("from all").unwrap()
///     .allow("from 10.0.0.0/8 env=TRUSTED").unwrap()
///     .satisfy(SatisfyMode::Any)
///     .build();
/// assert_eq!(policy.allow().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    policy: AccessPolicy,
}

impl AccessPolicyBuilder {
    /// Append entries from an `allow` directive value (`from <items>`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the line does not start with `from` or
    /// an item fails to parse.
    pub fn allow(mut self, line: &str) -> Result<Self, ConfigError> {
        self.policy
            .allow
            .extend(crate::parse::entries("allow", line)?);
        Ok(self)
    }

    /// Append entries from a `deny` directive value (`from <items>`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the line does not start with `from` or
    /// an item fails to parse.
    pub fn deny(mut self, line: &str) -> Result<Self, ConfigError> {
        self.policy.deny.extend(crate::parse::entries("deny", line)?);
        Ok(self)
    }

    /// Set the order mode from an `order` directive value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOrder`] for anything other than the
    /// exact strings `allow,deny`, `deny,allow`, or `mutual-failure`.
    pub fn order(mut self, value: &str) -> Result<Self, ConfigError> {
        self.policy.order = crate::parse::order(value)?;
        Ok(self)
    }

    #[must_use]
    pub fn satisfy(mut self, mode: SatisfyMode) -> Self {
        self.policy.satisfy = mode;
        self
    }

    /// Append an already-constructed allow entry.
    #[must_use]
    pub fn allow_entry(mut self, entry: AccessEntry) -> Self {
        self.policy.allow.push(entry);
        self
    }

    /// Append an already-constructed deny entry.
    #[must_use]
    pub fn deny_entry(mut self, entry: AccessEntry) -> Self {
        self.policy.deny.push(entry);
        self
    }

    #[must_use]
    pub fn build(self) -> AccessPolicy {
        self.policy
    }
}
