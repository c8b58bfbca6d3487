//! Homepage, static page and contact page handlers

use super::{conclude, notice, AdminContext, Notice};
use crate::models::contact::ContactData;
use crate::models::setting::{HomepageSettings, StaticPages};
use crate::services::{CacheAction, Invalidation};

pub async fn load_homepage(ctx: &AdminContext) -> Result<HomepageSettings, Notice> {
    conclude(
        "load",
        "homepage",
        None,
        ctx.services.content.load_homepage().await,
        "Ошибка загрузки настроек главной страницы",
    )
}

/// Save all homepage keys; a failure part-way keeps the keys already written
pub async fn save_homepage(ctx: &AdminContext, homepage: &HomepageSettings) -> Notice {
    let result = conclude(
        "save",
        "homepage",
        None,
        ctx.services.content.save_homepage(homepage).await,
        "Ошибка сохранения настроек",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::collection("settings", CacheAction::Update));
    }
    notice(result, "Настройки главной страницы сохранены!")
}

pub async fn load_pages(ctx: &AdminContext) -> Result<StaticPages, Notice> {
    conclude(
        "load",
        "pages",
        None,
        ctx.services.content.load_pages().await,
        "Ошибка загрузки страниц",
    )
}

pub async fn save_pages(ctx: &AdminContext, pages: &StaticPages) -> Notice {
    let result = conclude(
        "save",
        "pages",
        None,
        ctx.services.content.save_pages(pages).await,
        "Ошибка сохранения страниц",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::collection("settings", CacheAction::Update));
    }
    notice(result, "Страницы сохранены!")
}

/// Contact page content, or the empty form when it was never configured
pub async fn load_contacts(ctx: &AdminContext) -> Result<ContactData, Notice> {
    let contacts = conclude(
        "load",
        "contacts",
        None,
        ctx.db.contacts.get().await,
        "Ошибка загрузки контактов",
    )?;
    Ok(contacts.unwrap_or_default())
}

pub async fn save_contacts(ctx: &AdminContext, contacts: &ContactData) -> Notice {
    let result = conclude(
        "save",
        "contacts",
        None,
        ctx.db.contacts.set(contacts).await,
        "Ошибка сохранения контактов",
    );
    if result.is_ok() {
        ctx.invalidate(Invalidation::collection("pages", CacheAction::Update));
    }
    notice(result, "Контакты сохранены!")
}
