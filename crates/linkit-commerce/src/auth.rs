//! Actor and role types for authorization checks.
//!
//! Credential verification happens upstream; the core only ever sees an
//! already-authenticated actor and checks roles and ownership.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// An already-authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User ID.
    pub id: UserId,
    /// Authorization role.
    pub role: Role,
}

impl Actor {
    /// Create a customer actor.
    pub fn customer(id: UserId) -> Self {
        Self {
            id,
            role: Role::Customer,
        }
    }

    /// Create an admin actor.
    pub fn admin(id: UserId) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    /// Check whether this actor has administrative access.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check whether this actor is the given user.
    pub fn is_user(&self, user: &UserId) -> bool {
        &self.id == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::Customer));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_actor_checks() {
        let admin = Actor::admin(UserId::new("u1"));
        assert!(admin.is_admin());

        let customer = Actor::customer(UserId::new("u2"));
        assert!(!customer.is_admin());
        assert!(customer.is_user(&UserId::new("u2")));
        assert!(!customer.is_user(&UserId::new("u3")));
    }
}
