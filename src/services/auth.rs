use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::gen_id;
use crate::models::user::{Role, RoleProfile, User};
use crate::store::Store;

/// Optional profile fields accepted at registration.
#[derive(Debug, Default, Clone)]
pub struct Registration {
    pub name: Option<String>,
    pub shop_name: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<Store>,
}

impl AuthService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Register with a role name (`buyer`, `merchant`, `admin`; any case).
    pub fn register(&self, phone: &str, password: &str, role: &str) -> Result<User> {
        self.register_with(phone, password, role, Registration::default())
    }

    pub fn register_with(
        &self,
        phone: &str,
        password: &str,
        role: &str,
        extra: Registration,
    ) -> Result<User> {
        if phone.is_empty() {
            return Err(AppError::invalid_data("phone cannot be empty"));
        }
        if password.is_empty() {
            return Err(AppError::invalid_data("password cannot be empty"));
        }
        let role: Role = role.parse()?;

        // Cheap early exit; the store re-checks under its lock.
        if self.store.get_user_by_phone(phone).is_some() {
            return Err(AppError::DuplicatePhone(phone.to_string()));
        }

        let profile = match role {
            Role::Buyer => RoleProfile::Buyer,
            Role::Merchant => RoleProfile::Merchant {
                shop_name: extra
                    .shop_name
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| format!("{} shop", phone)),
                verified: false,
                shop_description: None,
            },
            Role::Admin => RoleProfile::Admin {
                privileges: BTreeSet::from(["all".to_string()]),
            },
        };

        let user = User {
            id: gen_id(role.id_prefix()),
            phone: phone.to_string(),
            name: extra
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| phone.to_string()),
            password_hash: obfuscate_password(password),
            created_at: Utc::now(),
            profile,
        };

        self.store.add_user(user.clone())?;
        info!(user_id = %user.id, role = %role, "user registered");
        Ok(user)
    }

    /// Phone + password lookup. Plain string comparison, no lockout.
    pub fn authenticate(&self, phone: &str, password: &str) -> Option<User> {
        self.store
            .get_user_by_phone(phone)
            .filter(|u| u.password_hash == obfuscate_password(password))
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.store.get_user(user_id)
    }

    pub fn list_users(&self) -> Vec<User> {
        self.store.list_users()
    }
}

/// Reversible obfuscation, not a cryptographic hash.
fn obfuscate_password(password: &str) -> String {
    let reversed: String = password.chars().rev().collect();
    format!("H:{}", reversed)
}
