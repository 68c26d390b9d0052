// Database Models
//
// Tokio-postgres compatible models for the entities the login flow reads:
// users, the NGOs they belong to, and each NGO's fundraising/expense actions.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio_postgres::Row;
use uuid::Uuid;

/// Trait for converting from tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self>
    where
        Self: Sized;
}

// ============================================================================
// USER & ORGANIZATION MODELS
// ============================================================================

/// User account belonging to one NGO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub ngo_id: Uuid,
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            ngo_id: row.try_get("ngo_id")?,
        })
    }
}

/// Organization publishing its fundraising and spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ngo {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Ngo {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

// ============================================================================
// ACTION MODELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fundraising,
    Expense,
}

impl FromStr for ActionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fundraising" => Ok(ActionKind::Fundraising),
            "expense" => Ok(ActionKind::Expense),
            other => bail!("Unknown action kind: {}", other),
        }
    }
}

/// A fundraising or expense entry published by an NGO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub ngo_id: Uuid,
    pub name: String,
    pub kind: ActionKind,
    pub value: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl FromRow for Action {
    fn from_row(row: &Row) -> Result<Self> {
        let kind: String = row.try_get("kind")?;
        Ok(Self {
            id: row.try_get("id")?,
            ngo_id: row.try_get("ngo_id")?,
            name: row.try_get("name")?,
            kind: kind.parse()?,
            value: row.try_get::<_, Decimal>("value")?,
            date: row.try_get("date")?,
            description: row.try_get("description")?,
        })
    }
}
