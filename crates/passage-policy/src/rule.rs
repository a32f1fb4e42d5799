//! Access rule definitions.
//!
//! A rule is the core decision unit: it binds a set of roles and a set of
//! control points to an optional [`TimeWindow`] and an optional
//! [`ValidityWindow`]. Updates are whole replacements; the decision core
//! only ever reads rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use passage_types::{ControlPointId, RoleId, RuleId, TenantId, TimeWindow, ValidityWindow};

/// Error type for malformed rule construction.
///
/// A rule with no roles or no control points can never grant anything, so
/// both sets must be non-empty before a rule is admitted into a candidate
/// set. Cross-tenant references are the owning collaborator's job to
/// reject; by the time a rule reaches the evaluator it is assumed
/// tenant-consistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The rule references no roles.
    #[error("rule {rule_id} has no roles; it could never grant access")]
    NoRoles { rule_id: RuleId },

    /// The rule references no control points.
    #[error("rule {rule_id} has no control points; it could never grant access")]
    NoControlPoints { rule_id: RuleId },
}

/// A policy record binding roles and control points to optional windows.
///
/// - `time_window: None` means the rule is active at every time of day.
/// - `validity: None` means the rule is permanently valid.
///
/// Immutable after construction. An administrative update replaces the
/// windows and sets wholesale rather than mutating them in place.
///
/// Deserialization routes through [`AccessRule::new`], so the non-empty-set
/// invariants hold on every construction path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAccessRule")]
pub struct AccessRule {
    rule_id: RuleId,
    tenant_id: TenantId,
    time_window: Option<TimeWindow>,
    validity: Option<ValidityWindow>,
    role_ids: BTreeSet<RoleId>,
    control_point_ids: BTreeSet<ControlPointId>,
}

/// Unvalidated wire form of [`AccessRule`].
#[derive(Deserialize)]
struct RawAccessRule {
    rule_id: RuleId,
    tenant_id: TenantId,
    time_window: Option<TimeWindow>,
    validity: Option<ValidityWindow>,
    role_ids: BTreeSet<RoleId>,
    control_point_ids: BTreeSet<ControlPointId>,
}

impl TryFrom<RawAccessRule> for AccessRule {
    type Error = RuleError;

    fn try_from(raw: RawAccessRule) -> Result<Self, Self::Error> {
        let mut rule = AccessRule::new(
            raw.rule_id,
            raw.tenant_id,
            raw.role_ids,
            raw.control_point_ids,
        )?;
        rule.time_window = raw.time_window;
        rule.validity = raw.validity;
        Ok(rule)
    }
}

impl AccessRule {
    /// Creates a rule with no window constraints (active 24/7, permanently).
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::NoRoles`] or [`RuleError::NoControlPoints`]
    /// when the corresponding set is empty.
    pub fn new(
        rule_id: RuleId,
        tenant_id: TenantId,
        role_ids: BTreeSet<RoleId>,
        control_point_ids: BTreeSet<ControlPointId>,
    ) -> Result<Self, RuleError> {
        if role_ids.is_empty() {
            return Err(RuleError::NoRoles { rule_id });
        }
        if control_point_ids.is_empty() {
            return Err(RuleError::NoControlPoints { rule_id });
        }
        Ok(Self {
            rule_id,
            tenant_id,
            time_window: None,
            validity: None,
            role_ids,
            control_point_ids,
        })
    }

    /// Constrains the rule to a time-of-day window (builder pattern).
    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// Constrains the rule to a calendar validity window (builder pattern).
    pub fn with_validity(mut self, window: ValidityWindow) -> Self {
        self.validity = Some(window);
        self
    }

    pub fn rule_id(&self) -> RuleId {
        self.rule_id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// The time-of-day constraint, or `None` for "24/7".
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// The calendar constraint, or `None` for "permanently valid".
    pub fn validity(&self) -> Option<&ValidityWindow> {
        self.validity.as_ref()
    }

    /// The roles this rule grants access to. Never empty.
    pub fn role_ids(&self) -> &BTreeSet<RoleId> {
        &self.role_ids
    }

    /// The control points this rule applies to. Never empty.
    pub fn control_point_ids(&self) -> &BTreeSet<ControlPointId> {
        &self.control_point_ids
    }

    /// Returns true when this rule is bound to the given control point.
    pub fn applies_to(&self, control_point_id: ControlPointId) -> bool {
        self.control_point_ids.contains(&control_point_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(ids: &[u64]) -> BTreeSet<RoleId> {
        ids.iter().copied().map(RoleId::new).collect()
    }

    fn control_points(ids: &[u64]) -> BTreeSet<ControlPointId> {
        ids.iter().copied().map(ControlPointId::new).collect()
    }

    #[test]
    fn rule_requires_roles() {
        let err = AccessRule::new(
            RuleId::new(1),
            TenantId::new(1),
            BTreeSet::new(),
            control_points(&[1]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::NoRoles {
                rule_id: RuleId::new(1)
            }
        );
    }

    #[test]
    fn rule_requires_control_points() {
        let err = AccessRule::new(
            RuleId::new(2),
            TenantId::new(1),
            roles(&[1]),
            BTreeSet::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::NoControlPoints {
                rule_id: RuleId::new(2)
            }
        );
    }

    #[test]
    fn unconstrained_rule_has_no_windows() {
        let rule = AccessRule::new(
            RuleId::new(3),
            TenantId::new(1),
            roles(&[1, 2]),
            control_points(&[10]),
        )
        .unwrap();
        assert!(rule.time_window().is_none());
        assert!(rule.validity().is_none());
    }

    #[test]
    fn applies_to_checks_membership() {
        let rule = AccessRule::new(
            RuleId::new(4),
            TenantId::new(1),
            roles(&[1]),
            control_points(&[10, 11]),
        )
        .unwrap();
        assert!(rule.applies_to(ControlPointId::new(10)));
        assert!(rule.applies_to(ControlPointId::new(11)));
        assert!(!rule.applies_to(ControlPointId::new(12)));
    }

    #[test]
    fn rule_serde_roundtrip() {
        let rule = AccessRule::new(
            RuleId::new(5),
            TenantId::new(2),
            roles(&[7]),
            control_points(&[3]),
        )
        .unwrap()
        .with_time_window(TimeWindow::parse("09:00", "17:00").unwrap())
        .with_validity(ValidityWindow::parse("2024-01-01", "2024-12-31").unwrap());

        let json = serde_json::to_string(&rule).unwrap();
        let back: AccessRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn deserialization_enforces_construction_invariants() {
        // An empty role set is rejected on the wire path, not just in new().
        let no_roles = r#"{
            "rule_id": 1,
            "tenant_id": 1,
            "time_window": null,
            "validity": null,
            "role_ids": [],
            "control_point_ids": [3]
        }"#;
        assert!(serde_json::from_str::<AccessRule>(no_roles).is_err());

        let no_control_points = r#"{
            "rule_id": 1,
            "tenant_id": 1,
            "time_window": null,
            "validity": null,
            "role_ids": [7],
            "control_point_ids": []
        }"#;
        assert!(serde_json::from_str::<AccessRule>(no_control_points).is_err());
    }
}
