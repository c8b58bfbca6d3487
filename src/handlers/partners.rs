//! Bank and leasing company handlers

use uuid::Uuid;
use super::{conclude, notice, AdminContext, Notice};
use crate::models::partner::{Bank, CreateBankRequest, CreateLeasingCompanyRequest, LeasingCompany};
use crate::services::Invalidation;

const BANKS: &str = "banks";
const LEASING: &str = "leasing_companies";

pub async fn load_banks(ctx: &AdminContext) -> Result<Vec<Bank>, Notice> {
    conclude("load", "bank", None, ctx.db.banks.get_all().await, "Ошибка загрузки банков")
}

pub async fn save_bank(ctx: &AdminContext, editing: Option<Uuid>, request: CreateBankRequest) -> Notice {
    let outcome = match editing {
        Some(id) => ctx
            .db
            .banks
            .replace(id, request)
            .await
            .map(|bank| Invalidation::updated(BANKS, bank.id)),
        None => ctx
            .db
            .banks
            .create(request)
            .await
            .map(|bank| Invalidation::created(BANKS, bank.id)),
    };

    let id_text = editing.map(|id| id.to_string());
    let result = conclude("save", "bank", id_text.as_deref(), outcome, "Ошибка сохранения банка");
    if let Ok(invalidation) = &result {
        ctx.invalidate(invalidation.clone());
    }
    notice(result, "Банк сохранен")
}

pub async fn delete_bank(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude("delete", "bank", Some(&id_text), ctx.db.banks.delete(id).await, "Ошибка удаления банка");
    if result.is_ok() {
        ctx.invalidate(Invalidation::deleted(BANKS, id));
    }
    notice(result, "Банк удален")
}

pub async fn load_leasing_companies(ctx: &AdminContext) -> Result<Vec<LeasingCompany>, Notice> {
    conclude(
        "load",
        "leasing company",
        None,
        ctx.db.leasing.get_all().await,
        "Ошибка загрузки лизинговых компаний",
    )
}

pub async fn save_leasing_company(
    ctx: &AdminContext,
    editing: Option<Uuid>,
    request: CreateLeasingCompanyRequest,
) -> Notice {
    let outcome = match editing {
        Some(id) => ctx
            .db
            .leasing
            .replace(id, request)
            .await
            .map(|company| Invalidation::updated(LEASING, company.id)),
        None => ctx
            .db
            .leasing
            .create(request)
            .await
            .map(|company| Invalidation::created(LEASING, company.id)),
    };

    let id_text = editing.map(|id| id.to_string());
    let result = conclude(
        "save",
        "leasing company",
        id_text.as_deref(),
        outcome,
        "Ошибка сохранения лизинговой компании",
    );
    if let Ok(invalidation) = &result {
        ctx.invalidate(invalidation.clone());
    }
    notice(result, "Лизинговая компания сохранена")
}

pub async fn delete_leasing_company(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "delete",
        "leasing company",
        Some(&id_text),
        ctx.db.leasing.delete(id).await,
        "Ошибка удаления лизинговой компании",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::deleted(LEASING, id));
    }
    notice(result, "Лизинговая компания удалена")
}
