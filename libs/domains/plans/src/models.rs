use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// ISO-4217 alphabetic code
static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in minor units of `currency` (cents for USD)
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    pub fn apply_update(&mut self, input: UpdatePlan) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(price_cents) = input.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(currency) = input.currency {
            self.currency = currency;
        }
        if let Some(duration_days) = input.duration_days {
            self.duration_days = duration_days;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlan {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0))]
    pub price_cents: i64,

    #[validate(regex(path = *CURRENCY_CODE))]
    pub currency: String,

    #[validate(range(min = 1, max = 3650))]
    pub duration_days: i32,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlan {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,

    #[validate(regex(path = *CURRENCY_CODE))]
    pub currency: Option<String>,

    #[validate(range(min = 1, max = 3650))]
    pub duration_days: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PlanSortField {
    #[default]
    Id,
    Name,
    PriceCents,
    DurationDays,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic() -> CreatePlan {
        CreatePlan {
            name: "Basic".to_string(),
            description: "Starter tier".to_string(),
            price_cents: 990,
            currency: "USD".to_string(),
            duration_days: 30,
        }
    }

    #[test]
    fn test_create_plan_valid() {
        assert!(basic().validate().is_ok());
    }

    #[test]
    fn test_create_plan_rejects_negative_price_and_bad_currency() {
        let input = CreatePlan {
            price_cents: -1,
            currency: "usd".to_string(),
            duration_days: 0,
            ..basic()
        };

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price_cents"));
        assert!(fields.contains_key("currency"));
        assert!(fields.contains_key("duration_days"));
    }

    #[test]
    fn test_free_plan_is_valid() {
        let input = CreatePlan {
            price_cents: 0,
            ..basic()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_apply_update_changes_only_present_fields() {
        let now = Utc::now();
        let mut plan = Plan {
            id: Uuid::now_v7(),
            name: "Basic".to_string(),
            description: String::new(),
            price_cents: 990,
            currency: "USD".to_string(),
            duration_days: 30,
            created_at: now,
            updated_at: now,
        };

        plan.apply_update(UpdatePlan {
            price_cents: Some(1290),
            ..Default::default()
        });

        assert_eq!(plan.price_cents, 1290);
        assert_eq!(plan.name, "Basic");
        assert_eq!(plan.duration_days, 30);
    }
}
