//! Settings and page content models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A key/value row of the `settings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Known settings keys
///
/// The `settings.value` column is schemaless; each key has one expected shape,
/// described by the type used with `SettingsRepository::get_as`.
pub mod keys {
    pub const HERO_TITLE: &str = "heroTitle";
    pub const HERO_SUBTITLE: &str = "heroSubtitle";
    pub const HERO_BUTTON_TEXT: &str = "heroButtonText";
    pub const CTA_TITLE: &str = "ctaTitle";
    pub const CTA_SUBTITLE: &str = "ctaSubtitle";

    pub const PAGE_ABOUT: &str = "page_about";
    pub const PAGE_CREDIT: &str = "page_credit";
    pub const PAGE_LEASING: &str = "page_leasing";
}

/// Homepage copy, one settings key per field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageSettings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button_text: String,
    pub cta_title: String,
    pub cta_subtitle: String,
}

impl Default for HomepageSettings {
    fn default() -> Self {
        Self {
            hero_title: "Найди свой автомобиль надежным способом".to_string(),
            hero_subtitle: "Поможем вам с приобретением автомобиля".to_string(),
            hero_button_text: "Посмотреть каталог".to_string(),
            cta_title: "Не нашли подходящий автомобиль?".to_string(),
            cta_subtitle: "Оставьте заявку, и мы подберем автомобиль специально для вас".to_string(),
        }
    }
}

/// Copy of a static page stored under a `page_*` settings key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

impl PageContent {
    fn new(title: &str, subtitle: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            description: description.to_string(),
        }
    }
}

/// The three editable static pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPages {
    pub about: PageContent,
    pub credit: PageContent,
    pub leasing: PageContent,
}

impl Default for StaticPages {
    fn default() -> Self {
        Self {
            about: PageContent::new(
                "О компании Белавто Центр",
                "Мы помогаем людям найти идеальный автомобиль уже более 12 лет",
                "Наша миссия — сделать покупку автомобиля простой, безопасной и выгодной.",
            ),
            credit: PageContent::new(
                "Автокредит на выгодных условиях",
                "Получите кредит на автомобиль мечты уже сегодня",
                "Мы работаем с ведущими банками Беларуси и поможем вам получить автокредит на самых выгодных условиях.",
            ),
            leasing: PageContent::new(
                "Лизинг автомобилей для бизнеса",
                "Выгодное решение для предпринимателей и юридических лиц",
                "Лизинг автомобилей - это удобный способ получить транспорт для бизнеса без больших первоначальных затрат.",
            ),
        }
    }
}
