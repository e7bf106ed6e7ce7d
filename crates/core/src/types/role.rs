//! User roles.

use serde::{Deserialize, Serialize};

/// Coarse authorization level for a user.
///
/// New registrations always start as [`Role::Customer`]; the admin role is
/// granted only through admin provisioning or an explicit role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper.
    #[default]
    Customer,
    /// Full access to the admin dashboard and management routes.
    Admin,
}

impl Role {
    /// Whether this role grants access to admin-only routes.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
        assert!(!Role::default().is_admin());
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [Role::Customer, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let parsed: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(parsed, Role::Customer);
    }
}
