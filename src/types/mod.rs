mod condition;
mod context;
mod decision;
mod entry;
mod error;
mod flag;
mod policy;
mod rule;

pub use condition::Condition;
pub use context::RequestContext;
pub use decision::Decision;
pub use entry::{AccessEntry, IpSpec};
pub use error::{ConfigError, InternalError};
pub use flag::{Flag, FlagKind};
pub use policy::{AccessPolicy, AccessPolicyBuilder, OrderMode, SatisfyMode};
pub use rule::{Rule, Substitution};
