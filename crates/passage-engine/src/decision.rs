//! Decision output values.
//!
//! A [`Decision`] is produced fresh for every call and never persisted by
//! the core; writing the resulting audit event is the caller's job. The
//! [`ReasonCode`] is the stable, telemetry-safe classification; the
//! `reason_text` is the human-readable explanation and may change wording
//! between releases.

use serde::{Deserialize, Serialize};

use passage_types::RuleId;

/// Display name used when a reference could not be resolved.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

// ============================================================================
// ReasonCode
// ============================================================================

/// Stable classification of a decision outcome.
///
/// Exactly one code is a grant ([`ReasonCode::RuleMatch`]); the rest are
/// denial causes, ordered here the way the pipeline checks them. Callers
/// map codes to telemetry and audit categories without string-matching
/// prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// No identity matches the supplied user reference.
    IdentityNotFound,
    /// The credential reference does not resolve to an identity.
    CredentialNotFound,
    /// The control point reference does not resolve.
    ControlPointNotFound,
    /// Identity and control point belong to different tenants.
    TenantMismatch,
    /// The identity resolved but its credential is not active.
    CredentialInactive,
    /// The control point has zero bound rules.
    NoRulesConfigured,
    /// The identity has zero assigned roles.
    NoRolesAssigned,
    /// Every bound rule was time-inactive at the evaluation instant.
    OutsideAllowedSchedule,
    /// At least one rule was active but none authorized the identity's roles.
    RoleNotAuthorized,
    /// Grant: an active rule authorized one of the identity's roles.
    RuleMatch,
}

impl ReasonCode {
    /// Stable string form for telemetry and audit categorization.
    ///
    /// These strings are part of the external contract and never change.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::IdentityNotFound => "IDENTITY_NOT_FOUND",
            ReasonCode::CredentialNotFound => "CREDENTIAL_NOT_FOUND",
            ReasonCode::ControlPointNotFound => "CONTROL_POINT_NOT_FOUND",
            ReasonCode::TenantMismatch => "TENANT_MISMATCH",
            ReasonCode::CredentialInactive => "CREDENTIAL_INACTIVE",
            ReasonCode::NoRulesConfigured => "NO_RULES_CONFIGURED",
            ReasonCode::NoRolesAssigned => "NO_ROLES_ASSIGNED",
            ReasonCode::OutsideAllowedSchedule => "OUTSIDE_ALLOWED_SCHEDULE",
            ReasonCode::RoleNotAuthorized => "ROLE_NOT_AUTHORIZED",
            ReasonCode::RuleMatch => "RULE_MATCH",
        }
    }

    /// Returns true for the single granting code.
    pub fn is_grant(&self) -> bool {
        matches!(self, ReasonCode::RuleMatch)
    }

    /// Default human-readable text for denial codes.
    ///
    /// The grant text is built by the engine because it names the matched
    /// roles and rule.
    pub(crate) fn denial_text(&self) -> &'static str {
        match self {
            ReasonCode::IdentityNotFound => "No identity matches the presented reference",
            ReasonCode::CredentialNotFound => "Credential does not resolve to an identity",
            ReasonCode::ControlPointNotFound => "Control point does not resolve",
            ReasonCode::TenantMismatch => {
                "Identity and control point belong to different tenants"
            }
            ReasonCode::CredentialInactive => "Credential is not active",
            ReasonCode::NoRulesConfigured => {
                "No access rules are configured for this control point"
            }
            ReasonCode::NoRolesAssigned => "Identity has no roles assigned",
            ReasonCode::OutsideAllowedSchedule => {
                "No rule for this control point is active at this time"
            }
            ReasonCode::RoleNotAuthorized => {
                "The identity's roles are not authorized at this control point"
            }
            ReasonCode::RuleMatch => "Access granted",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Decision
// ============================================================================

/// The engine's output: grant/deny plus a stable reason and display context.
///
/// `reason_text` is already human-readable at construction; callers surface
/// it verbatim and use `reason_code` for anything programmatic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether passage is granted.
    pub granted: bool,
    /// Stable classification of the outcome.
    pub reason_code: ReasonCode,
    /// Human-readable explanation, built once at decision time.
    pub reason_text: String,
    /// The rule that granted access, when one did.
    pub matched_rule: Option<RuleId>,
    /// Display name of the subject, or "Unknown" when unresolved.
    pub subject_display_name: String,
    /// Display name of the control point, or "Unknown" when unresolved.
    pub control_point_display_name: String,
    /// Display name of the control point's space, or "Unknown" when unresolved.
    pub space_display_name: String,
}

impl Decision {
    /// Builds a grant decision.
    pub(crate) fn granted(
        reason_text: String,
        matched_rule: RuleId,
        subject: &str,
        control_point: &str,
        space: &str,
    ) -> Self {
        Self {
            granted: true,
            reason_code: ReasonCode::RuleMatch,
            reason_text,
            matched_rule: Some(matched_rule),
            subject_display_name: subject.to_string(),
            control_point_display_name: control_point.to_string(),
            space_display_name: space.to_string(),
        }
    }

    /// Builds a denial with the code's default text.
    pub(crate) fn denied(
        reason_code: ReasonCode,
        subject: &str,
        control_point: &str,
        space: &str,
    ) -> Self {
        debug_assert!(!reason_code.is_grant());
        Self {
            granted: false,
            reason_code,
            reason_text: reason_code.denial_text().to_string(),
            matched_rule: None,
            subject_display_name: subject.to_string(),
            control_point_display_name: control_point.to_string(),
            space_display_name: space.to_string(),
        }
    }
}
