//! Lead and contact form handlers
//!
//! Submissions come from the public site; status changes and deletions from
//! the operator.

use uuid::Uuid;
use super::{conclude, notice, AdminContext, Notice};
use crate::models::lead::{ContactForm, ContactFormStatus, CreateContactFormRequest, CreateLeadRequest, Lead, LeadStatus};

pub async fn load_leads(ctx: &AdminContext) -> Result<Vec<Lead>, Notice> {
    conclude("load", "lead", None, ctx.db.leads.get_all().await, "Ошибка загрузки заявок")
}

/// Record a lead; it always starts as `new`
pub async fn submit_lead(ctx: &AdminContext, request: CreateLeadRequest) -> Notice {
    let result = conclude("submit", "lead", None, ctx.db.leads.create(request).await, "Ошибка отправки заявки");
    notice(result, "Заявка отправлена")
}

pub async fn set_lead_status(ctx: &AdminContext, id: Uuid, status: LeadStatus) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "status",
        "lead",
        Some(&id_text),
        ctx.db.leads.update_status(id, status).await,
        "Ошибка обновления заявки",
    );
    notice(result, "Статус заявки обновлен")
}

pub async fn delete_lead(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "delete",
        "lead",
        Some(&id_text),
        ctx.db.leads.delete(id).await,
        "Ошибка удаления заявки",
    );
    notice(result, "Заявка удалена")
}

pub async fn load_contact_forms(ctx: &AdminContext) -> Result<Vec<ContactForm>, Notice> {
    conclude(
        "load",
        "contact form",
        None,
        ctx.db.contact_forms.get_all().await,
        "Ошибка загрузки обращений",
    )
}

pub async fn submit_contact_form(ctx: &AdminContext, request: CreateContactFormRequest) -> Notice {
    let result = conclude(
        "submit",
        "contact form",
        None,
        ctx.db.contact_forms.create(request).await,
        "Ошибка отправки сообщения",
    );
    notice(result, "Сообщение отправлено")
}

pub async fn set_contact_form_status(ctx: &AdminContext, id: Uuid, status: ContactFormStatus) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "status",
        "contact form",
        Some(&id_text),
        ctx.db.contact_forms.update_status(id, status).await,
        "Ошибка обновления обращения",
    );
    notice(result, "Статус обращения обновлен")
}

pub async fn delete_contact_form(ctx: &AdminContext, id: Uuid) -> Notice {
    let id_text = id.to_string();
    let result = conclude(
        "delete",
        "contact form",
        Some(&id_text),
        ctx.db.contact_forms.delete(id).await,
        "Ошибка удаления обращения",
    );
    notice(result, "Обращение удалено")
}
