use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Digits with optional leading `+` and common separators
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()-]{5,18}[0-9]$").unwrap());

/// Canonical form of an email address; users are stored and matched by it.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// A user account, independent of how it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Applies the present fields of `input` and bumps `updated_at`.
    pub fn apply_update(&mut self, input: UpdateUser) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(email) = input.email {
            self.email = normalize_email(&email);
        }
        if let Some(phone) = input.phone {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(regex(path = *PHONE_NUMBER))]
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial update; absent fields are left untouched and `"phone": null` clears the phone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email, length(max = 255))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_NUMBER))]
    #[serde(default, deserialize_with = "axum_helpers::nullable::deserialize")]
    pub phone: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Properties accepted by `?sort=`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UserSortField {
    #[default]
    Id,
    Name,
    Email,
    CreatedAt,
    UpdatedAt,
}
