//! Rule-policy predicates.
//!
//! Pure functions over an [`AccessRule`], an instant, and a role set.
//! No side effects and no failure path: malformed rules are rejected at
//! construction, so every input reaching these predicates is well-formed.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::rule::AccessRule;
use passage_types::RoleId;

/// Returns true when the rule is active at the given instant.
///
/// Two independent checks, both of which must pass:
/// - the validity window (if present) contains the instant's date,
/// - the time window (if present) contains the instant's time of day.
///
/// An absent window always satisfies its dimension: a rule with no time
/// window is "24/7", a rule with no validity window is permanently valid.
/// A rule can be date-valid but time-inactive at a given moment, or vice
/// versa; either alone makes it inactive.
pub fn is_active_at(rule: &AccessRule, at: NaiveDateTime) -> bool {
    let date_ok = rule.validity().is_none_or(|w| w.contains(at.date()));
    let time_ok = rule.time_window().is_none_or(|w| w.contains(at.time()));
    date_ok && time_ok
}

/// Returns true when the rule authorizes at least one of the presented
/// roles.
///
/// No partial credit and no priority among roles: any single matching role
/// is sufficient.
pub fn allows(rule: &AccessRule, role_ids: &BTreeSet<RoleId>) -> bool {
    rule.role_ids().iter().any(|id| role_ids.contains(id))
}

/// The intersection of the rule's roles and the presented roles.
///
/// Used by the engine to name the matched roles in audit text; the result
/// is in role-id order, so the text is deterministic.
pub fn matching_roles(rule: &AccessRule, role_ids: &BTreeSet<RoleId>) -> BTreeSet<RoleId> {
    rule.role_ids().intersection(role_ids).copied().collect()
}
