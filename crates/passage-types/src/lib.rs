//! # passage-types: Core types for Passage
//!
//! This crate contains shared types used across the Passage system:
//! - Entity IDs ([`TenantId`], [`UserId`], [`RoleId`], [`ControlPointId`],
//!   [`CredentialId`], [`RuleId`])
//! - Temporal windows ([`TimeWindow`], [`ValidityWindow`])
//! - Read-only projections ([`IdentitySnapshot`], [`ControlPointSnapshot`])
//!
//! Every type here is an immutable value: no identity beyond the ID types
//! themselves, no interior mutability, and no I/O. Construction validates
//! well-formedness; everything after construction is a total function.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod snapshot;
pub mod window;

pub use snapshot::{ControlPointSnapshot, IdentitySnapshot};
pub use window::{TimeWindow, ValidityWindow, WindowError};

// ============================================================================
// Entity IDs - All Copy (cheap 8-byte values)
// ============================================================================

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a tenant (organization/customer).
    ///
    /// Tenants are the isolation boundary: every identity, control point,
    /// and access rule belongs to exactly one tenant, and the decision
    /// engine refuses any cross-tenant pairing before evaluating rules.
    TenantId
}

entity_id! {
    /// Unique identifier for a user within the system.
    UserId
}

entity_id! {
    /// Unique identifier for a role.
    ///
    /// Roles are opaque to the core: a rule grants access when any one of
    /// its role IDs matches one of the subject's role IDs.
    RoleId
}

entity_id! {
    /// Unique identifier for a control point (a door or other checkpoint).
    ControlPointId
}

entity_id! {
    /// Unique identifier for a credential (badge, fob, mobile token).
    ///
    /// A credential is bound to exactly one user; its active/inactive state
    /// lives on the identity snapshot, not here.
    CredentialId
}

entity_id! {
    /// Unique identifier for an access rule.
    RuleId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let tenant = TenantId::new(42);
        assert_eq!(u64::from(tenant), 42);
        assert_eq!(TenantId::from(42), tenant);
        assert_eq!(tenant.to_string(), "42");
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Same numeric value, different types: ordering and equality only
        // exist within a single ID type. This compiles only because the
        // types never unify.
        let user = UserId::new(7);
        let role = RoleId::new(7);
        assert_eq!(u64::from(user), u64::from(role));
    }

    #[test]
    fn test_id_ordering() {
        assert!(RuleId::new(1) < RuleId::new(2));
        assert!(ControlPointId::new(9) > ControlPointId::new(3));
    }

    #[test]
    fn test_id_serde() {
        let id = CredentialId::new(99);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "99");
        let back: CredentialId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
