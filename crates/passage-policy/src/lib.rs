//! # passage-policy: Access rules for Passage
//!
//! The policy layer of the access decision engine:
//! - [`AccessRule`]: a tenant-owned record binding roles and control points
//!   to an optional time-of-day window and an optional validity date range
//! - [`evaluator`]: the pure predicates that decide whether a rule is
//!   active at an instant and whether it authorizes a role set
//!
//! ## Semantics
//!
//! A rule grants passage when **both** hold at the evaluation instant:
//! 1. the rule is *active*: its validity window (if any) contains the date
//!    and its time window (if any) contains the time of day — an absent
//!    window means that dimension always passes ("24/7" / "permanent");
//! 2. the rule *allows* the subject: the intersection of the rule's roles
//!    and the subject's roles is non-empty. Any single matching role is
//!    sufficient; there is no priority among roles.
//!
//! Malformed rules are rejected at construction ([`RuleError`]), never at
//! evaluation time: the predicates are total and have no error path.

pub mod evaluator;
pub mod rule;

pub use evaluator::{allows, is_active_at, matching_roles};
pub use rule::{AccessRule, RuleError};
