//! Financing (bank) and leasing partner models
//!
//! Both lists are displayed in `order_index` order rather than by creation time.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::validation::{
    require_between, require_finite, require_non_negative, require_ordered_range, require_text,
};
use crate::utils::errors::ValidationError;

pub const MAX_ADVANCE_PERCENT: f64 = 100.0;

/// A `min_*`/`max_*` pair of finite, non-negative numbers with `min <= max`
fn check_range(field: &'static str, min: f64, max: f64) -> Result<(), ValidationError> {
    require_finite(field, min)?;
    require_finite(field, max)?;
    require_non_negative(field, min)?;
    require_ordered_range(field, min, max)
}

fn check_terms(min: i32, max: i32) -> Result<(), ValidationError> {
    require_non_negative("term_months", min)?;
    require_ordered_range("term_months", min, max)
}

fn check_advance(min: f64, max: f64) -> Result<(), ValidationError> {
    check_range("advance_percent", min, max)?;
    require_between("advance_percent", max, 0.0, MAX_ADVANCE_PERCENT)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_term_months: i32,
    pub max_term_months: i32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBankRequest {
    pub name: String,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_term_months: i32,
    pub max_term_months: i32,
    pub features: Vec<String>,
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBankRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_term_months: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_term_months: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl CreateBankRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        check_range("rate", self.min_rate, self.max_rate)?;
        check_range("amount", self.min_amount, self.max_amount)?;
        check_terms(self.min_term_months, self.max_term_months)
    }
}

impl UpdateBankRequest {
    /// Checks the pairs fully present in the patch
    ///
    /// A patch carrying only one side of a range is checked against the stored record by the repository.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        Ok(())
    }

    /// Apply the patch on top of `bank` and check the resulting ranges
    pub fn validate_against(&self, bank: &Bank) -> Result<(), ValidationError> {
        self.validate()?;
        check_range(
            "rate",
            self.min_rate.unwrap_or(bank.min_rate),
            self.max_rate.unwrap_or(bank.max_rate),
        )?;
        check_range(
            "amount",
            self.min_amount.unwrap_or(bank.min_amount),
            self.max_amount.unwrap_or(bank.max_amount),
        )?;
        check_terms(
            self.min_term_months.unwrap_or(bank.min_term_months),
            self.max_term_months.unwrap_or(bank.max_term_months),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasingCompany {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_advance_percent: f64,
    pub max_advance_percent: f64,
    pub min_term_months: i32,
    pub max_term_months: i32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLeasingCompanyRequest {
    pub name: String,
    pub logo_url: Option<String>,
    pub description: Option<String>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_advance_percent: f64,
    pub max_advance_percent: f64,
    pub min_term_months: i32,
    pub max_term_months: i32,
    pub features: Vec<String>,
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLeasingCompanyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_advance_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_advance_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_term_months: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_term_months: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl CreateLeasingCompanyRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        check_range("rate", self.min_rate, self.max_rate)?;
        check_advance(self.min_advance_percent, self.max_advance_percent)?;
        check_terms(self.min_term_months, self.max_term_months)
    }
}

impl UpdateLeasingCompanyRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        Ok(())
    }

    /// Apply the patch on top of `company` and check the resulting ranges
    pub fn validate_against(&self, company: &LeasingCompany) -> Result<(), ValidationError> {
        self.validate()?;
        check_range(
            "rate",
            self.min_rate.unwrap_or(company.min_rate),
            self.max_rate.unwrap_or(company.max_rate),
        )?;
        check_advance(
            self.min_advance_percent.unwrap_or(company.min_advance_percent),
            self.max_advance_percent.unwrap_or(company.max_advance_percent),
        )?;
        check_terms(
            self.min_term_months.unwrap_or(company.min_term_months),
            self.max_term_months.unwrap_or(company.max_term_months),
        )
    }
}
