//! Collaborator seams.
//!
//! The engine consumes three lookup capabilities and defines no wire format
//! of its own. Implementations return completed snapshots or an explicit
//! `None`; a failed resolution is a terminal business outcome for the
//! pipeline, not a transient fault, so there is no error type and no retry
//! here. The contract is agnostic to how an implementation obtains the
//! data — async embedders resolve first and hand the engine finished
//! values.

use std::sync::Arc;

use passage_policy::AccessRule;
use passage_types::{
    ControlPointId, ControlPointSnapshot, CredentialId, IdentitySnapshot, UserId,
};

/// Resolves user and credential references to identity snapshots.
pub trait IdentityLookup {
    /// Looks up an identity by user id.
    fn find_by_id(&self, user_id: UserId) -> Option<IdentitySnapshot>;

    /// Looks up the identity owning a credential.
    fn find_by_credential(&self, credential_id: CredentialId) -> Option<IdentitySnapshot>;
}

/// Resolves control-point references to snapshots.
pub trait ControlPointLookup {
    fn find_by_id(&self, control_point_id: ControlPointId) -> Option<ControlPointSnapshot>;
}

/// Supplies the candidate rules bound to a control point.
///
/// The returned list is already tenant-scoped by the collaborator; the
/// engine does not re-filter by tenant beyond its identity/control-point
/// tenant match. The engine calls this exactly once per decision and
/// evaluates that one consistent snapshot of rules.
pub trait RuleLookup {
    fn rules_for_control_point(&self, control_point_id: ControlPointId) -> Vec<AccessRule>;
}

// Arc forwarding, so one shared collaborator can serve several engine seams
// (and several engines) without cloning the underlying store.

impl<T: IdentityLookup + ?Sized> IdentityLookup for Arc<T> {
    fn find_by_id(&self, user_id: UserId) -> Option<IdentitySnapshot> {
        self.as_ref().find_by_id(user_id)
    }

    fn find_by_credential(&self, credential_id: CredentialId) -> Option<IdentitySnapshot> {
        self.as_ref().find_by_credential(credential_id)
    }
}

impl<T: ControlPointLookup + ?Sized> ControlPointLookup for Arc<T> {
    fn find_by_id(&self, control_point_id: ControlPointId) -> Option<ControlPointSnapshot> {
        self.as_ref().find_by_id(control_point_id)
    }
}

impl<T: RuleLookup + ?Sized> RuleLookup for Arc<T> {
    fn rules_for_control_point(&self, control_point_id: ControlPointId) -> Vec<AccessRule> {
        self.as_ref().rules_for_control_point(control_point_id)
    }
}
