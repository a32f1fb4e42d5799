//! # passage-engine: the access decision engine
//!
//! Decides, for an identity presenting at a control point at an instant,
//! whether passage is granted, and why.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  decide(user, control point, now)            │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessDecisionEngine                        │
//! │  ├─ resolve identity / control point         │
//! │  ├─ tenant isolation + credential liveness   │
//! │  ├─ rule loop (first active+allowing wins)   │
//! │  └─ denial-reason disambiguation             │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Decision                                    │
//! │  - granted / denied                          │
//! │  - stable ReasonCode + human-readable text   │
//! │  - display context for the caller's UI/audit │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The engine is stateless and side-effect-free per call: `decide` is a pure
//! query over its inputs and the snapshots supplied by the three lookup
//! collaborators, so concurrent calls never interact and identical inputs
//! always produce identical decisions. Denials are values, never errors;
//! the only fallible paths in the system are window and rule construction,
//! upstream of the engine.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use chrono::NaiveDateTime;
//! use passage_engine::{
//!     AccessDecisionEngine, ControlPointLookup, IdentityLookup, ReasonCode, RuleLookup,
//! };
//! use passage_policy::AccessRule;
//! use passage_types::{
//!     ControlPointId, ControlPointSnapshot, CredentialId, IdentitySnapshot, RoleId, RuleId,
//!     TenantId, UserId,
//! };
//!
//! struct Fixture;
//!
//! impl IdentityLookup for Fixture {
//!     fn find_by_id(&self, user_id: UserId) -> Option<IdentitySnapshot> {
//!         (user_id == UserId::new(1)).then(|| {
//!             IdentitySnapshot::new(user_id, TenantId::new(1), "Dana Kim")
//!                 .with_role(RoleId::new(1), "Student")
//!         })
//!     }
//!     fn find_by_credential(&self, _: CredentialId) -> Option<IdentitySnapshot> {
//!         None
//!     }
//! }
//!
//! impl ControlPointLookup for Fixture {
//!     fn find_by_id(&self, id: ControlPointId) -> Option<ControlPointSnapshot> {
//!         Some(ControlPointSnapshot::new(id, TenantId::new(1), "North Door", "Building A"))
//!     }
//! }
//!
//! impl RuleLookup for Fixture {
//!     fn rules_for_control_point(&self, id: ControlPointId) -> Vec<AccessRule> {
//!         vec![AccessRule::new(
//!             RuleId::new(1),
//!             TenantId::new(1),
//!             BTreeSet::from([RoleId::new(1)]),
//!             BTreeSet::from([id]),
//!         )
//!         .unwrap()]
//!     }
//! }
//!
//! let engine = AccessDecisionEngine::new(Fixture, Fixture, Fixture).without_audit();
//! let now = NaiveDateTime::parse_from_str("2024-06-15 12:00", "%Y-%m-%d %H:%M").unwrap();
//! let decision = engine.decide(UserId::new(1), ControlPointId::new(7), now);
//! assert!(decision.granted);
//! assert_eq!(decision.reason_code, ReasonCode::RuleMatch);
//! ```

pub mod decision;
pub mod engine;
pub mod lookup;

pub use decision::{Decision, ReasonCode};
pub use engine::AccessDecisionEngine;
pub use lookup::{ControlPointLookup, IdentityLookup, RuleLookup};
