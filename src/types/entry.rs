use std::fmt;
use std::net::IpAddr;

use ipnetwork::IpNetwork;

use super::context::RequestContext;
use super::error::ConfigError;

/// One predicate in an allow or deny list.
///
/// Entries are produced from directive text by
/// [`parse::entries()`](crate::parse::entries) and evaluated in declared
/// order; the first matching entry decides the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessEntry {
    /// Matches every request.
    All,
    /// Matches when the named variable is present in the request environment.
    EnvPresent(String),
    /// Matches when the named variable is absent from the request environment.
    EnvAbsent(String),
    /// Matches when the client address falls within the spec.
    IpMatch(IpSpec),
    /// Matches when the resolved client hostname ends in the pattern.
    HostMatch(String),
}

impl AccessEntry {
    /// Evaluate this entry against the request context.
    #[must_use]
    pub fn matches(&self, ctx: &RequestContext) -> bool {
        match self {
            AccessEntry::All => true,
            AccessEntry::EnvPresent(name) => ctx.env().contains_key(name),
            AccessEntry::EnvAbsent(name) => !ctx.env().contains_key(name),
            AccessEntry::IpMatch(spec) => spec.matches(ctx.client_ip()),
            AccessEntry::HostMatch(pattern) => ctx
                .hostname()
                .is_some_and(|host| host_matches(pattern, host)),
        }
    }
}

impl fmt::Display for AccessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessEntry::All => write!(f, "all"),
            AccessEntry::EnvPresent(name) => write!(f, "env={name}"),
            AccessEntry::EnvAbsent(name) => write!(f, "env=!{name}"),
            AccessEntry::IpMatch(spec) => write!(f, "{spec}"),
            AccessEntry::HostMatch(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// A client-address specification in one of the three accepted forms:
/// a full address, a dotted partial address, or a CIDR subnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpSpec {
    /// A complete address, matched by equality.
    Exact(IpAddr),
    /// A dotted partial address like `10.1`, matched as a prefix ending on
    /// an octet boundary.
    Prefix(String),
    /// A CIDR subnet, matched by containment.
    Subnet(IpNetwork),
}

impl IpSpec {
    /// Parse a spec string. A string containing `/` must be a valid CIDR
    /// subnet; a full address parses as [`Exact`](IpSpec::Exact); anything
    /// else is kept as a dotted prefix.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        if spec.contains('/') {
            return spec
                .parse::<IpNetwork>()
                .map(IpSpec::Subnet)
                .map_err(|e| ConfigError::InvalidIpSpec {
                    spec: spec.to_owned(),
                    reason: e.to_string(),
                });
        }
        if let Ok(addr) = spec.parse::<IpAddr>() {
            return Ok(IpSpec::Exact(addr));
        }
        Ok(IpSpec::Prefix(spec.to_owned()))
    }

    /// Whether the given client address falls within this spec.
    #[must_use]
    pub fn matches(&self, addr: IpAddr) -> bool {
        match self {
            IpSpec::Exact(spec) => *spec == addr,
            IpSpec::Subnet(network) => network.contains(addr),
            IpSpec::Prefix(prefix) => {
                // Terminate both sides with a dot so "10.1" matches 10.1.2.3
                // but never 10.10.2.3.
                let mut wanted = prefix.clone();
                if !wanted.ends_with('.') {
                    wanted.push('.');
                }
                format!("{addr}.").starts_with(&wanted)
            }
        }
    }
}

impl fmt::Display for IpSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpSpec::Exact(addr) => write!(f, "{addr}"),
            IpSpec::Prefix(prefix) => write!(f, "{prefix}"),
            IpSpec::Subnet(network) => write!(f, "{network}"),
        }
    }
}

/// Case-insensitive suffix match on a label boundary: `example.com` matches
/// `www.example.com` and `example.com` itself, but not `badexample.com`.
fn host_matches(pattern: &str, host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();
    let pattern = pattern.trim_start_matches('.');
    if pattern.is_empty() {
        return false;
    }
    host == pattern || host.ends_with(&format!(".{pattern}"))
}
