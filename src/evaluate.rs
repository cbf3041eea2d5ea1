use tracing::{debug, trace};

use crate::trace::{EntryList, StepOutcome, Trace, TraceEvent};
use crate::types::{
    AccessEntry, AccessPolicy, Decision, FlagKind, OrderMode, RequestContext, Rule, SatisfyMode,
};

/// Evaluate a rule's condition chain in declared order.
///
/// Every condition is AND-ed into the chain unless it carries the OR
/// combinator: a failing mandatory condition fails the rule outright, while
/// a matching OR-flagged condition passes it outright. Completing the loop
/// without an early stop is a pass.
pub(crate) fn rule_matches(rule: &Rule, ctx: &RequestContext, observer: &mut dyn Trace) -> bool {
    for (index, condition) in rule.conditions().iter().enumerate() {
        let matched = condition.matches(ctx);
        let or_next = condition.has_flag(FlagKind::OrNext);
        trace!(
            index,
            matched,
            or_next,
            variable = condition.test_variable(),
            "condition evaluated"
        );

        if !matched && !or_next {
            observer.record(TraceEvent::Condition {
                index,
                matched,
                outcome: StepOutcome::FailedRule,
            });
            debug!(index, "mandatory condition failed, skipping remaining conditions");
            return false;
        }

        if matched && or_next {
            observer.record(TraceEvent::Condition {
                index,
                matched,
                outcome: StepOutcome::MatchedRule,
            });
            debug!(index, "alternative condition matched, skipping remaining conditions");
            return true;
        }

        observer.record(TraceEvent::Condition {
            index,
            matched,
            outcome: StepOutcome::Continue,
        });
    }

    true
}

/// First-match OR scan over an entry list. Order does not change the
/// boolean result but is observable through the trace.
pub(crate) fn matches_any(
    entries: &[AccessEntry],
    list: EntryList,
    ctx: &RequestContext,
    observer: &mut dyn Trace,
) -> bool {
    for (index, entry) in entries.iter().enumerate() {
        let matched = entry.matches(ctx);
        observer.record(TraceEvent::Entry {
            list,
            index,
            matched,
        });
        trace!(?list, index, matched, entry = %entry, "entry evaluated");
        if matched {
            return true;
        }
    }
    false
}

/// The access-check state machine: combine the allow and deny lists under
/// the policy's order mode, then derive the terminal decision.
pub(crate) fn check_access(
    policy: &AccessPolicy,
    ctx: &mut RequestContext,
    observer: &mut dyn Trace,
) -> Decision {
    let result = match policy.order() {
        OrderMode::AllowThenDeny => {
            let mut result = matches_any(policy.allow(), EntryList::Allow, ctx, observer);
            if matches_any(policy.deny(), EntryList::Deny, ctx, observer) {
                result = false;
            }
            result
        }
        OrderMode::DenyThenAllow => {
            let mut result = true;
            if matches_any(policy.deny(), EntryList::Deny, ctx, observer) {
                result = false;
            }
            if matches_any(policy.allow(), EntryList::Allow, ctx, observer) {
                result = true;
            }
            result
        }
        OrderMode::MutualFailure => {
            matches_any(policy.allow(), EntryList::Allow, ctx, observer)
                && !matches_any(policy.deny(), EntryList::Deny, ctx, observer)
        }
    };

    let decision = if result {
        Decision::Permit
    } else if policy.satisfy() == SatisfyMode::Any && ctx.has_require() {
        // A require check later in the pipeline may still grant access.
        Decision::Deferred
    } else {
        Decision::Forbidden
    };

    debug!(order = ?policy.order(), result, %decision, "access check complete");
    ctx.record_outcome(decision);
    decision
}
