//! The decision pipeline.
//!
//! An ordered sequence of checks, each a terminal-or-continue transition:
//! the first failing check terminates with its specific reason, no check is
//! retried, and every path produces a [`Decision`].

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::decision::{Decision, ReasonCode, UNKNOWN_DISPLAY_NAME};
use crate::lookup::{ControlPointLookup, IdentityLookup, RuleLookup};
use passage_policy::{allows, is_active_at, matching_roles};
use passage_types::{ControlPointId, ControlPointSnapshot, CredentialId, IdentitySnapshot, UserId};

/// Orchestrates the end-to-end access decision.
///
/// Generic over the three collaborator seams. The engine holds no mutable
/// state: `decide` is a pure query, so one engine can serve any number of
/// parallel callers (it is `Send + Sync` whenever its collaborators are).
///
/// Pipeline order:
/// 1. resolve identity (`IdentityNotFound`)
/// 2. resolve control point (`ControlPointNotFound`)
/// 3. tenant isolation (`TenantMismatch`) — before any business rule,
///    never bypassable
/// 4. credential liveness (`CredentialInactive`)
/// 5. rule presence (`NoRulesConfigured`)
/// 6. role presence (`NoRolesAssigned`)
/// 7. rule loop — first active rule that allows a role grants
///    (`RuleMatch`)
/// 8. exhausted — `OutsideAllowedSchedule` when no rule was active,
///    otherwise `RoleNotAuthorized`
pub struct AccessDecisionEngine<I, C, R> {
    identities: I,
    control_points: C,
    rules: R,

    /// Whether to emit tracing events for each decision.
    audit_enabled: bool,
}

impl<I, C, R> AccessDecisionEngine<I, C, R>
where
    I: IdentityLookup,
    C: ControlPointLookup,
    R: RuleLookup,
{
    /// Creates an engine over the given collaborators.
    pub fn new(identities: I, control_points: C, rules: R) -> Self {
        Self {
            identities,
            control_points,
            rules,
            audit_enabled: true,
        }
    }

    /// Disables decision logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Decides whether the user may pass the control point at `now`.
    ///
    /// Always returns a [`Decision`]; denial is a value, not an error.
    pub fn decide(
        &self,
        user_id: UserId,
        control_point_id: ControlPointId,
        now: NaiveDateTime,
    ) -> Decision {
        // Step 1: resolve identity.
        let Some(identity) = self.identities.find_by_id(user_id) else {
            return self.deny_unresolved(ReasonCode::IdentityNotFound, control_point_id);
        };
        self.evaluate(&identity, control_point_id, now)
    }

    /// Decides by presented credential instead of user reference.
    ///
    /// Resolves the credential to its owning identity first, then runs the
    /// same pipeline as [`decide`](Self::decide) from the control-point step
    /// onward, so both entry points share one evaluation core and one
    /// reason taxonomy.
    pub fn decide_by_credential(
        &self,
        credential_id: CredentialId,
        control_point_id: ControlPointId,
        now: NaiveDateTime,
    ) -> Decision {
        let Some(identity) = self.identities.find_by_credential(credential_id) else {
            return self.deny_unresolved(ReasonCode::CredentialNotFound, control_point_id);
        };
        self.evaluate(&identity, control_point_id, now)
    }

    /// Steps 2–8, shared by both entry points.
    fn evaluate(
        &self,
        identity: &IdentitySnapshot,
        control_point_id: ControlPointId,
        now: NaiveDateTime,
    ) -> Decision {
        // Step 2: resolve control point.
        let Some(control_point) = self.control_points.find_by_id(control_point_id) else {
            return self.audited(Decision::denied(
                ReasonCode::ControlPointNotFound,
                &identity.display_name,
                UNKNOWN_DISPLAY_NAME,
                UNKNOWN_DISPLAY_NAME,
            ));
        };

        // Step 3: tenant isolation. Evaluated before any business rule so a
        // numeric id collision across tenants can never leak access.
        if identity.tenant_id != control_point.tenant_id {
            return self.audited(self.deny(ReasonCode::TenantMismatch, identity, &control_point));
        }

        // Step 4: credential liveness.
        if !identity.has_active_credential {
            return self.audited(self.deny(ReasonCode::CredentialInactive, identity, &control_point));
        }

        // Step 5: rule presence. Fetched exactly once; steps 7 and 8 both
        // run over this one consistent snapshot of candidates.
        let candidates = self.rules.rules_for_control_point(control_point_id);
        if candidates.is_empty() {
            return self.audited(self.deny(ReasonCode::NoRulesConfigured, identity, &control_point));
        }

        // Step 6: role presence.
        let role_ids = identity.role_ids();
        if role_ids.is_empty() {
            return self.audited(self.deny(ReasonCode::NoRolesAssigned, identity, &control_point));
        }

        // Step 7: rule loop. Order is not significant for correctness (any
        // match grants) but the first match short-circuits and is reported.
        let mut any_active = false;
        for rule in &candidates {
            if !is_active_at(rule, now) {
                continue;
            }
            any_active = true;
            if allows(rule, &role_ids) {
                let matched = matching_roles(rule, &role_ids);
                let names = identity.role_names(&matched).join(", ");
                let decision = Decision::granted(
                    format!("Access granted by rule {} for roles: {names}", rule.rule_id()),
                    rule.rule_id(),
                    &identity.display_name,
                    &control_point.display_name,
                    &control_point.space_display_name,
                );
                return self.audited(decision);
            }
        }

        // Step 8: exhausted without a grant. Distinguish "nothing was
        // scheduled now" from "scheduled, but not for these roles".
        let reason = if any_active {
            ReasonCode::RoleNotAuthorized
        } else {
            ReasonCode::OutsideAllowedSchedule
        };
        self.audited(self.deny(reason, identity, &control_point))
    }

    fn deny(
        &self,
        reason: ReasonCode,
        identity: &IdentitySnapshot,
        control_point: &ControlPointSnapshot,
    ) -> Decision {
        Decision::denied(
            reason,
            &identity.display_name,
            &control_point.display_name,
            &control_point.space_display_name,
        )
    }

    /// Denial before both references resolved; unresolved context shows as
    /// "Unknown".
    fn deny_unresolved(&self, reason: ReasonCode, control_point_id: ControlPointId) -> Decision {
        let decision = Decision::denied(
            reason,
            UNKNOWN_DISPLAY_NAME,
            UNKNOWN_DISPLAY_NAME,
            UNKNOWN_DISPLAY_NAME,
        );
        if self.audit_enabled {
            warn!(
                reason = %reason,
                control_point = %control_point_id,
                "access denied"
            );
        }
        decision
    }

    fn audited(&self, decision: Decision) -> Decision {
        if self.audit_enabled {
            if decision.granted {
                info!(
                    subject = %decision.subject_display_name,
                    control_point = %decision.control_point_display_name,
                    rule = ?decision.matched_rule,
                    "access granted"
                );
            } else {
                warn!(
                    subject = %decision.subject_display_name,
                    control_point = %decision.control_point_display_name,
                    reason = %decision.reason_code,
                    "access denied"
                );
            }
        }
        decision
    }
}
