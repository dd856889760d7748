use serde::{Deserialize, Serialize};

use crate::role::Role;

/// An authenticated user identity.
///
/// A `Principal` is a read-only projection reconstructed on every request
/// from a verified credential. It is never persisted on its own and has no
/// mutating methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque unique identifier for this user
    pub user_id: String,
    /// Contact email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Role granted to this user
    pub role: Role,
}

impl Principal {
    /// Returns `true` if this principal holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Returns `true` if this principal is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: "u-1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            role,
        }
    }

    #[test]
    fn has_role_matches_exactly() {
        let p = principal(Role::Dealer);
        assert!(p.has_role(Role::Dealer));
        assert!(!p.has_role(Role::Admin));
        assert!(!p.is_admin());
    }

    #[test]
    fn is_admin_only_for_admin_role() {
        assert!(principal(Role::Admin).is_admin());
        for role in [Role::Client, Role::Dealer, Role::Agent] {
            assert!(!principal(role).is_admin());
        }
    }

    #[test]
    fn principal_serde_round_trip() {
        let p = principal(Role::Client);
        let json = serde_json::to_string(&p).unwrap();
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
