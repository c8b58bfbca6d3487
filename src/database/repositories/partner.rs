//! Bank and leasing company repository implementations
//!
//! Partner lists are ordered by `order_index` ascending. Updates are checked
//! against the stored record so a patch carrying one side of a range cannot
//! leave the row with `min > max`.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use super::collection::{by_order_index, Collection};
use crate::database::store::{Store, Table};
use crate::models::partner::{
    Bank, CreateBankRequest, CreateLeasingCompanyRequest, LeasingCompany, UpdateBankRequest,
    UpdateLeasingCompanyRequest,
};
use crate::utils::errors::{DealerDeskError, Result};

#[derive(Debug, Clone)]
pub struct BankRepository {
    banks: Collection<Bank>,
}

impl BankRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            banks: Collection::new(store, Table::Banks),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Bank>> {
        self.banks.list(&by_order_index()).await
    }

    /// Active banks only, in display order
    pub async fn get_active(&self) -> Result<Vec<Bank>> {
        self.banks.list(&by_order_index().eq("is_active", true)).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Bank>> {
        self.banks.find_by_id(id).await
    }

    pub async fn create(&self, request: CreateBankRequest) -> Result<Bank> {
        request.validate()?;
        debug!(name = %request.name, order_index = request.order_index, "Creating bank");
        self.banks.insert(&request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateBankRequest) -> Result<Bank> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DealerDeskError::NotFound { resource: "bank", id: id.to_string() })?;
        request.validate_against(&current)?;
        self.banks.update(id, &request).await
    }

    /// Overwrite bank `id` with a complete form; empty logo and description become null
    pub async fn replace(&self, id: Uuid, request: CreateBankRequest) -> Result<Bank> {
        request.validate()?;
        debug!(bank_id = %id, "Replacing bank");
        self.banks.update(id, &request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.banks.delete(id).await
    }
}

#[derive(Debug, Clone)]
pub struct LeasingRepository {
    companies: Collection<LeasingCompany>,
}

impl LeasingRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            companies: Collection::new(store, Table::LeasingCompanies),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<LeasingCompany>> {
        self.companies.list(&by_order_index()).await
    }

    pub async fn get_active(&self) -> Result<Vec<LeasingCompany>> {
        self.companies.list(&by_order_index().eq("is_active", true)).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<LeasingCompany>> {
        self.companies.find_by_id(id).await
    }

    pub async fn create(&self, request: CreateLeasingCompanyRequest) -> Result<LeasingCompany> {
        request.validate()?;
        debug!(name = %request.name, order_index = request.order_index, "Creating leasing company");
        self.companies.insert(&request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateLeasingCompanyRequest) -> Result<LeasingCompany> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DealerDeskError::NotFound { resource: "leasing company", id: id.to_string() })?;
        request.validate_against(&current)?;
        self.companies.update(id, &request).await
    }

    pub async fn replace(&self, id: Uuid, request: CreateLeasingCompanyRequest) -> Result<LeasingCompany> {
        request.validate()?;
        debug!(company_id = %id, "Replacing leasing company");
        self.companies.update(id, &request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.companies.delete(id).await
    }
}
