//! Request-time policy evaluation for HTTP-style routing.
//!
//! Two independent engines share one design idea, an ordered predicate list
//! with short-circuit combination:
//!
//! - [`Rule`] decides whether a rewrite rule's conditions currently hold
//!   (AND-chained conditions with OR-flagged alternatives, memoized per
//!   instance).
//! - [`AccessPolicy`] decides whether host/environment based access rules
//!   permit, forbid, or defer a request (ordered allow/deny precedence,
//!   mutual failure, satisfy-any deferral).
//!
//! Both are built once from directive text and evaluated per request
//! against a [`RequestContext`]:
//!
//! ```
//! use htgate::{AccessPolicy, Decision, RequestContext};
//!
//! let policy = AccessPolicy::builder()
//!     .order("deny,allow").unwrap()
//!     .deny("from all").unwrap()
//!     .allow("from 127.0.0.1").unwrap()
//!     .build();
//!
//! let mut local = RequestContext::new("127.0.0.1".parse().unwrap());
//! assert_eq!(policy.check_access(&mut local), Decision::Permit);
//!
//! let mut remote = RequestContext::new("8.8.8.8".parse().unwrap());
//! assert_eq!(policy.check_access(&mut remote), Decision::Forbidden);
//! ```

pub mod authn;
mod error;
mod evaluate;
pub mod parse;
mod trace;
mod types;

pub use error::HtgateError;
pub use trace::{EntryList, NoopTrace, RecordingTrace, StepOutcome, Trace, TraceEvent};
pub use types::{
    AccessEntry, AccessPolicy, AccessPolicyBuilder, Condition, ConfigError, Decision, Flag,
    FlagKind, InternalError, IpSpec, OrderMode, RequestContext, Rule, SatisfyMode, Substitution,
};
