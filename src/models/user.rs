use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Merchant,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Merchant => "merchant",
            Role::Admin => "admin",
        }
    }

    pub(crate) fn id_prefix(&self) -> &'static str {
        match self {
            Role::Buyer => "u_",
            Role::Merchant => "m_",
            Role::Admin => "a_",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "merchant" => Ok(Role::Merchant),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::invalid_data(format!("unknown role: {}", other))),
        }
    }
}

/// Role-specific part of a user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Buyer,
    Merchant {
        shop_name: String,
        verified: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        shop_description: Option<String>,
    },
    Admin {
        privileges: BTreeSet<String>,
    },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Buyer => Role::Buyer,
            RoleProfile::Merchant { .. } => Role::Merchant,
            RoleProfile::Admin { .. } => Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub phone: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.profile, RoleProfile::Admin { .. })
    }

    pub fn shop_name(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Merchant { shop_name, .. } => Some(shop_name),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "phone cannot be empty"))]
    pub phone: String,
    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginWithPhone {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    pub credit_score: f64,
}

impl UserResponse {
    pub fn new(user: &User, credit_score: f64) -> Self {
        UserResponse {
            id: user.id.clone(),
            phone: user.phone.clone(),
            name: user.name.clone(),
            role: user.role(),
            shop_name: user.shop_name().map(str::to_string),
            credit_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!("BUYER".parse::<Role>().unwrap(), Role::Buyer);
        assert_eq!("Merchant".parse::<Role>().unwrap(), Role::Merchant);
        assert_eq!(" admin ".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn serializes_profile_with_role_tag() {
        let user = User {
            id: "m_1".into(),
            phone: "1".into(),
            name: "Bob".into(),
            password_hash: "H:x".into(),
            created_at: Utc::now(),
            profile: RoleProfile::Merchant {
                shop_name: "BobShop".into(),
                verified: false,
                shop_description: None,
            },
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "merchant");
        assert_eq!(json["shop_name"], "BobShop");
        assert!(json.get("password_hash").is_none());
    }
}
