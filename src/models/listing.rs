//! Vehicle listing model

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;
use crate::models::validation::{normalize_image_urls, parse_finite, parse_number, require_non_negative, require_text, require_between};
use crate::utils::errors::ValidationError;

/// Specification names every new listing draft starts with
pub const DEFAULT_SPECIFICATIONS: [&str; 6] = [
    "Двигатель",
    "Разгон 0-100",
    "Расход топлива",
    "Привод",
    "Коробка передач",
    "Мощность",
];

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: Option<i64>,
    pub engine_volume: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub drive_train: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub is_available: bool,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateListingRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: Option<i64>,
    pub engine_volume: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub drive_train: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    pub is_available: bool,
    pub specifications: BTreeMap<String, String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateListingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_train: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl CreateListingRequest {
    /// Check required fields and collapse the image list
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        require_text("make", &self.make)?;
        require_text("model", &self.model)?;
        validate_numbers(Some(self.year), Some(self.price), self.mileage)?;
        self.image_urls = normalize_image_urls(&self.image_urls);
        Ok(self)
    }
}

impl UpdateListingRequest {
    /// Same rules as creation, applied to the fields present
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        if let Some(make) = &self.make {
            require_text("make", make)?;
        }
        if let Some(model) = &self.model {
            require_text("model", model)?;
        }
        validate_numbers(self.year, self.price, self.mileage)?;
        if let Some(urls) = self.image_urls.take() {
            self.image_urls = Some(normalize_image_urls(&urls));
        }
        Ok(self)
    }
}

fn validate_numbers(year: Option<i32>, price: Option<f64>, mileage: Option<i64>) -> Result<(), ValidationError> {
    if let Some(year) = year {
        require_between("year", year, MIN_YEAR, MAX_YEAR)?;
    }
    if let Some(price) = price {
        if !price.is_finite() {
            return Err(ValidationError::NotANumber { field: "price", value: price.to_string() });
        }
        require_non_negative("price", price)?;
    }
    if let Some(mileage) = mileage {
        require_non_negative("mileage", mileage)?;
    }
    Ok(())
}

/// Edit-form state of a listing
///
/// Numeric fields hold raw text as typed by the operator. `image_urls` always
/// has at least one slot; an empty string is the placeholder for a new URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub mileage: String,
    pub engine_volume: String,
    pub fuel_type: String,
    pub transmission: String,
    pub drive_train: String,
    pub body_type: String,
    pub color: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub is_available: bool,
    pub specifications: BTreeMap<String, String>,
    pub features: Vec<String>,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: Utc::now().year().to_string(),
            price: "0".to_string(),
            mileage: "0".to_string(),
            engine_volume: String::new(),
            fuel_type: String::new(),
            transmission: String::new(),
            drive_train: String::new(),
            body_type: String::new(),
            color: String::new(),
            description: String::new(),
            image_urls: vec![String::new()],
            is_available: true,
            specifications: DEFAULT_SPECIFICATIONS
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
            features: Vec::new(),
        }
    }
}

impl From<&Listing> for ListingDraft {
    fn from(listing: &Listing) -> Self {
        let image_urls = if listing.image_urls.is_empty() {
            vec![String::new()]
        } else {
            listing.image_urls.clone()
        };

        Self {
            make: listing.make.clone(),
            model: listing.model.clone(),
            year: listing.year.to_string(),
            price: listing.price.to_string(),
            mileage: listing.mileage.unwrap_or(0).to_string(),
            engine_volume: listing.engine_volume.clone().unwrap_or_default(),
            fuel_type: listing.fuel_type.clone().unwrap_or_default(),
            transmission: listing.transmission.clone().unwrap_or_default(),
            drive_train: listing.drive_train.clone().unwrap_or_default(),
            body_type: listing.body_type.clone().unwrap_or_default(),
            color: listing.color.clone().unwrap_or_default(),
            description: listing.description.clone().unwrap_or_default(),
            image_urls,
            is_available: listing.is_available,
            specifications: listing.specifications.clone(),
            features: listing.features.clone(),
        }
    }
}

impl ListingDraft {
    /// Add an empty image slot
    pub fn add_image_slot(&mut self) {
        self.image_urls.push(String::new());
    }

    /// Remove an image slot, keeping at least the placeholder
    pub fn remove_image_slot(&mut self, index: usize) {
        if index < self.image_urls.len() {
            self.image_urls.remove(index);
        }
        if self.image_urls.is_empty() {
            self.image_urls.push(String::new());
        }
    }

    /// Convert the form state into a write request
    ///
    /// Fails on the first field that does not parse; nothing is written in that case.
    pub fn into_request(self) -> Result<CreateListingRequest, ValidationError> {
        let year = parse_number::<i32>("year", &self.year)?;
        let price = parse_finite("price", &self.price)?;
        let mileage = if self.mileage.trim().is_empty() {
            None
        } else {
            Some(parse_number::<i64>("mileage", &self.mileage)?)
        };

        CreateListingRequest {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year,
            price,
            mileage,
            engine_volume: non_empty(self.engine_volume),
            fuel_type: non_empty(self.fuel_type),
            transmission: non_empty(self.transmission),
            drive_train: non_empty(self.drive_train),
            body_type: non_empty(self.body_type),
            color: non_empty(self.color),
            description: non_empty(self.description),
            image_urls: self.image_urls,
            is_available: self.is_available,
            specifications: self.specifications,
            features: self.features.into_iter().filter(|f| !f.trim().is_empty()).collect(),
        }
        .normalize()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
