//! Access control evaluator for the admin back-office.
//!
//! Roles form a genuine total order — each higher role is a strict superset
//! of the capabilities below it — so authorization reduces to an ordinal
//! comparison instead of a general ACL. The comparison fails closed: an
//! unknown principal role ranks below `user`, and an unknown *required* role
//! always denies, so a misconfigured rule can never accidentally grant
//! access.
//!
//! Every call site in the system goes through this one module; the role
//! table is not duplicated anywhere else.

use crate::types::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal assigned to a principal whose role claim is unrecognized.
const UNKNOWN_PRINCIPAL_ORDINAL: u16 = 0;

/// Ordinal assigned to an unrecognized *required* role: always denies.
const UNKNOWN_REQUIREMENT_ORDINAL: u16 = 999;

/// Minimum role required to manage reservations and messages.
pub const RESERVATION_MANAGEMENT_ROLE: Role = Role::Moderator;

/// A role in the fixed hierarchy `user < editor < moderator < admin`.
///
/// Derived ordering follows declaration order, which matches the ordinal
/// table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account, rank 1.
    User,
    /// May manage retreats and blog content, rank 2.
    Editor,
    /// May additionally manage reservations and messages, rank 3.
    Moderator,
    /// Full access including user management and settings, rank 4.
    Admin,
}

impl Role {
    /// Integer rank of this role in the total order.
    #[must_use]
    pub const fn ordinal(self) -> u16 {
        match self {
            Self::User => 1,
            Self::Editor => 2,
            Self::Moderator => 3,
            Self::Admin => 4,
        }
    }

    /// The role's identifier as stored in session/account records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Editor => "editor",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }

    /// Parse a role identifier. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "editor" => Some(Self::Editor),
            "moderator" => Some(Self::Moderator),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of a principal's raw role claim. Unrecognized claims rank below
/// `user`.
#[must_use]
pub fn principal_ordinal(role: &str) -> u16 {
    Role::parse(role).map_or(UNKNOWN_PRINCIPAL_ORDINAL, Role::ordinal)
}

/// Rank demanded by a rule's required role. Unrecognized requirements rank
/// above every principal, denying everyone.
#[must_use]
pub fn required_ordinal(role: &str) -> u16 {
    Role::parse(role).map_or(UNKNOWN_REQUIREMENT_ORDINAL, Role::ordinal)
}

/// Decide whether a principal with `principal_role` may perform an operation
/// gated at `required_role`.
///
/// Total and side-effect free: every input, however malformed, yields a
/// boolean. `None` means the operation is unrestricted.
///
/// # Examples
///
/// ```
/// use retiro_core::access::can_access;
///
/// assert!(can_access("admin", Some("moderator")));
/// assert!(!can_access("editor", Some("moderator")));
/// assert!(can_access("intern", None));
/// assert!(!can_access("intern", Some("user")));
/// ```
#[must_use]
pub fn can_access(principal_role: &str, required_role: Option<&str>) -> bool {
    match required_role {
        None => true,
        Some(required) => principal_ordinal(principal_role) >= required_ordinal(required),
    }
}

/// Convenience check for an already-materialized [`Principal`].
#[must_use]
pub fn principal_can_access(principal: &Principal, required_role: Option<Role>) -> bool {
    can_access(&principal.role, required_role.map(Role::as_str))
}

// ============================================================================
// Resource access rules
// ============================================================================

/// Static binding of an admin-facing operation to a minimum required role.
///
/// Rules are configuration, not data: defined once at startup and treated as
/// immutable. The required role is kept as a string so that a hand-edited
/// rule with a typo denies everyone instead of panicking or granting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    /// The operation or route this rule gates, e.g. `"reservations"`.
    pub operation: String,
    /// Minimum role, or `None` for an unrestricted operation.
    pub required_role: Option<String>,
}

impl AccessRule {
    /// Create a rule requiring at least `role`.
    pub fn new(operation: impl Into<String>, role: Role) -> Self {
        Self {
            operation: operation.into(),
            required_role: Some(role.as_str().to_string()),
        }
    }

    /// Create a rule with no role restriction.
    pub fn unrestricted(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            required_role: None,
        }
    }
}

/// The rules for the admin area as shipped: user management and settings
/// require `admin`; retreat and blog management require `editor`;
/// reservation and message management require `moderator`; the dashboard is
/// open to any authenticated principal.
#[must_use]
pub fn default_rules() -> Vec<AccessRule> {
    vec![
        AccessRule::unrestricted("dashboard"),
        AccessRule::new("retreats", Role::Editor),
        AccessRule::new("blog", Role::Editor),
        AccessRule::new("reservations", RESERVATION_MANAGEMENT_ROLE),
        AccessRule::new("messages", RESERVATION_MANAGEMENT_ROLE),
        AccessRule::new("users", Role::Admin),
        AccessRule::new("settings", Role::Admin),
    ]
}

/// Partition of access rules from one principal's point of view.
///
/// Drives which admin actions are surfaced versus shown-but-disabled.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulePartition {
    /// Rules the principal satisfies, in original list order.
    pub accessible: Vec<AccessRule>,
    /// Rules the principal does not satisfy, in original list order.
    pub restricted: Vec<AccessRule>,
}

/// Partition `rules` into the operations `principal_role` may and may not
/// perform.
///
/// The input is not mutated and relative order is preserved within each
/// partition.
#[must_use]
pub fn visible_operations(principal_role: &str, rules: &[AccessRule]) -> RulePartition {
    let mut partition = RulePartition::default();
    for rule in rules {
        if can_access(principal_role, rule.required_role.as_deref()) {
            partition.accessible.push(rule.clone());
        } else {
            partition.restricted.push(rule.clone());
        }
    }
    partition
}
