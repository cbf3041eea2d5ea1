use std::collections::HashMap;
use std::net::IpAddr;

use super::decision::Decision;

/// Per-request facts consumed during evaluation: the client address, the
/// resolved client hostname, the request environment, and generic server
/// variables, plus whether any require directive exists for the current
/// scope.
///
/// The engine never mutates a context except to record the final access
/// decision.
#[derive(Debug, Clone)]
pub struct RequestContext {
    client_ip: IpAddr,
    hostname: Option<String>,
    env: HashMap<String, String>,
    vars: HashMap<String, String>,
    has_require: bool,
    outcome: Option<Decision>,
}

impl RequestContext {
    #[must_use]
    pub fn new(client_ip: IpAddr) -> Self {
        Self {
            client_ip,
            hostname: None,
            env: HashMap::new(),
            vars: HashMap::new(),
            has_require: false,
            outcome: None,
        }
    }

    /// Set the resolved client hostname.
    #[must_use]
    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_owned());
        self
    }

    /// Set an environment variable.
    #[must_use]
    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Set a server variable, resolvable by conditions via its name.
    #[must_use]
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Mark whether any require directive is present for this scope.
    #[must_use]
    pub fn with_require(mut self, has_require: bool) -> Self {
        self.has_require = has_require;
        self
    }

    #[must_use]
    pub fn client_ip(&self) -> IpAddr {
        self.client_ip
    }

    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    #[must_use]
    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    #[must_use]
    pub fn has_require(&self) -> bool {
        self.has_require
    }

    /// The decision recorded by the last access check, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<Decision> {
        self.outcome
    }

    /// Resolve a condition test variable.
    ///
    /// `REMOTE_ADDR` resolves to the client address, `REMOTE_HOST` to the
    /// resolved hostname, `ENV:name` to the environment map, and anything
    /// else to the server-variable map.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<String> {
        if name == "REMOTE_ADDR" {
            return Some(self.client_ip.to_string());
        }
        if name == "REMOTE_HOST" {
            return self.hostname.clone();
        }
        if let Some(env_name) = name.strip_prefix("ENV:") {
            return self.env.get(env_name).cloned();
        }
        self.vars.get(name).cloned()
    }

    pub(crate) fn record_outcome(&mut self, decision: Decision) {
        self.outcome = Some(decision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("192.168.1.10".parse().unwrap())
            .with_hostname("client.example.com")
            .with_env("APP", "on")
            .with_var("REQUEST_METHOD", "GET")
    }

    #[test]
    fn remote_addr_variable() {
        assert_eq!(ctx().variable("REMOTE_ADDR").as_deref(), Some("192.168.1.10"));
    }

    #[test]
    fn remote_host_variable() {
        assert_eq!(
            ctx().variable("REMOTE_HOST").as_deref(),
            Some("client.example.com")
        );
        let bare = RequestContext::new("192.168.1.10".parse().unwrap());
        assert_eq!(bare.variable("REMOTE_HOST"), None);
    }

    #[test]
    fn env_prefixed_variable() {
        assert_eq!(ctx().variable("ENV:APP").as_deref(), Some("on"));
        assert_eq!(ctx().variable("ENV:OFF"), None);
    }

    #[test]
    fn server_variable_fallback() {
        assert_eq!(ctx().variable("REQUEST_METHOD").as_deref(), Some("GET"));
        assert_eq!(ctx().variable("UNKNOWN"), None);
    }

    #[test]
    fn outcome_starts_unset() {
        let mut c = ctx();
        assert_eq!(c.outcome(), None);
        c.record_outcome(Decision::Permit);
        assert_eq!(c.outcome(), Some(Decision::Permit));
    }

    #[test]
    fn require_flag_defaults_off() {
        assert!(!ctx().has_require());
        assert!(ctx().with_require(true).has_require());
    }
}
