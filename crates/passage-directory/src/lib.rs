//! passage-directory: In-memory directory collaborators for Passage
//!
//! Implements the engine's three lookup seams over in-memory registries.
//! This is the reference collaborator used by embedders that keep their
//! identity and rule data in process, and by the end-to-end test suites;
//! a production deployment backed by a database implements the same traits
//! against its own storage.
//!
//! Admission is where rule hygiene is enforced: [`AccessDirectory::with_rule`]
//! rejects rules that reference unregistered or cross-tenant control
//! points, so the decision engine never receives an inconsistent rule.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use passage_directory::AccessDirectory;
//! use passage_policy::AccessRule;
//! use passage_types::{
//!     ControlPointId, ControlPointSnapshot, IdentitySnapshot, RoleId, RuleId, TenantId, UserId,
//! };
//!
//! let directory = AccessDirectory::new()
//!     .with_control_point(ControlPointSnapshot::new(
//!         ControlPointId::new(1),
//!         TenantId::new(1),
//!         "North Door",
//!         "Building A",
//!     ))
//!     .with_identity(
//!         IdentitySnapshot::new(UserId::new(1), TenantId::new(1), "Dana Kim")
//!             .with_role(RoleId::new(1), "Student"),
//!     )
//!     .with_rule(
//!         AccessRule::new(
//!             RuleId::new(1),
//!             TenantId::new(1),
//!             BTreeSet::from([RoleId::new(1)]),
//!             BTreeSet::from([ControlPointId::new(1)]),
//!         )
//!         .unwrap(),
//!     )
//!     .unwrap();
//! # let _ = directory;
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use passage_engine::{ControlPointLookup, IdentityLookup, RuleLookup};
use passage_policy::AccessRule;
use passage_types::{
    ControlPointId, ControlPointSnapshot, CredentialId, IdentitySnapshot, RuleId, TenantId, UserId,
};

/// Errors that can occur while admitting records into the directory.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DirectoryError {
    /// A credential binding references a user that is not registered.
    #[error("credential {credential_id} references unknown user {user_id}")]
    UnknownUser {
        credential_id: CredentialId,
        user_id: UserId,
    },

    /// A rule references a control point that is not registered.
    #[error("rule {rule_id} references unknown control point {control_point_id}")]
    UnknownControlPoint {
        rule_id: RuleId,
        control_point_id: ControlPointId,
    },

    /// A rule references a control point owned by a different tenant.
    #[error(
        "rule {rule_id} (tenant {rule_tenant}) references control point \
         {control_point_id} owned by tenant {control_point_tenant}"
    )]
    ControlPointTenantMismatch {
        rule_id: RuleId,
        rule_tenant: TenantId,
        control_point_id: ControlPointId,
        control_point_tenant: TenantId,
    },
}

/// In-memory registry of identities, credentials, control points, and rules.
///
/// Serves all three lookup seams of the decision engine. Rule lookups are
/// tenant-scoped by construction: admission guarantees a rule's control
/// points belong to the rule's tenant.
///
/// # Thread Safety
///
/// `AccessDirectory` is `Clone` and immutable after building; wrap it in an
/// [`std::sync::Arc`] to share one registry across the engine's three seams
/// and across threads (the lookup traits forward through `Arc`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessDirectory {
    identities: HashMap<UserId, IdentitySnapshot>,
    credentials: HashMap<CredentialId, UserId>,
    control_points: HashMap<ControlPointId, ControlPointSnapshot>,
    rules: Vec<AccessRule>,
}

impl AccessDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity snapshot (builder pattern).
    ///
    /// Re-registering a user id replaces the previous snapshot wholesale;
    /// there is no partial mutation of an identity.
    pub fn with_identity(mut self, identity: IdentitySnapshot) -> Self {
        self.identities.insert(identity.user_id, identity);
        self
    }

    /// Binds a credential to its owning user (builder pattern).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UnknownUser`] when the user is not
    /// registered.
    pub fn with_credential(
        self,
        credential_id: CredentialId,
        user_id: UserId,
    ) -> Result<Self, DirectoryError> {
        if !self.identities.contains_key(&user_id) {
            return Err(DirectoryError::UnknownUser {
                credential_id,
                user_id,
            });
        }
        let mut this = self;
        this.credentials.insert(credential_id, user_id);
        Ok(this)
    }

    /// Registers a control point snapshot (builder pattern).
    pub fn with_control_point(mut self, snapshot: ControlPointSnapshot) -> Self {
        self.control_points
            .insert(snapshot.control_point_id, snapshot);
        self
    }

    /// Admits a rule after validating its control-point references.
    ///
    /// Every control point the rule names must be registered and owned by
    /// the rule's tenant. This is the upstream guarantee the engine relies
    /// on: an invalid rule never reaches a candidate set.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::UnknownControlPoint`]
    /// - [`DirectoryError::ControlPointTenantMismatch`]
    pub fn with_rule(mut self, rule: AccessRule) -> Result<Self, DirectoryError> {
        for &control_point_id in rule.control_point_ids() {
            let Some(snapshot) = self.control_points.get(&control_point_id) else {
                return Err(DirectoryError::UnknownControlPoint {
                    rule_id: rule.rule_id(),
                    control_point_id,
                });
            };
            if snapshot.tenant_id != rule.tenant_id() {
                return Err(DirectoryError::ControlPointTenantMismatch {
                    rule_id: rule.rule_id(),
                    rule_tenant: rule.tenant_id(),
                    control_point_id,
                    control_point_tenant: snapshot.tenant_id,
                });
            }
        }
        self.rules.push(rule);
        Ok(self)
    }

    /// Replaces a rule wholesale, keyed by rule id.
    ///
    /// An update is a full replace of windows and sets; the old rule is
    /// removed before the new one is validated and admitted.
    pub fn replace_rule(mut self, rule: AccessRule) -> Result<Self, DirectoryError> {
        self.rules.retain(|r| r.rule_id() != rule.rule_id());
        self.with_rule(rule)
    }

    /// Removes a rule. Unknown ids are a no-op.
    pub fn remove_rule(mut self, rule_id: RuleId) -> Self {
        self.rules.retain(|r| r.rule_id() != rule_id);
        self
    }

    /// Number of admitted rules, across all control points.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl IdentityLookup for AccessDirectory {
    fn find_by_id(&self, user_id: UserId) -> Option<IdentitySnapshot> {
        self.identities.get(&user_id).cloned()
    }

    fn find_by_credential(&self, credential_id: CredentialId) -> Option<IdentitySnapshot> {
        let user_id = self.credentials.get(&credential_id)?;
        self.identities.get(user_id).cloned()
    }
}

impl ControlPointLookup for AccessDirectory {
    fn find_by_id(&self, control_point_id: ControlPointId) -> Option<ControlPointSnapshot> {
        self.control_points.get(&control_point_id).cloned()
    }
}

impl RuleLookup for AccessDirectory {
    /// Candidate rules in admission order. Tenant scoping holds by
    /// construction.
    fn rules_for_control_point(&self, control_point_id: ControlPointId) -> Vec<AccessRule> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(control_point_id))
            .cloned()
            .collect()
    }
}
