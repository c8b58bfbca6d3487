//! Homepage and static page content
//!
//! Each piece of copy lives under its own settings key. Loads and saves touch
//! all keys concurrently; a save that fails part-way leaves the keys already
//! written in place.

use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;
use crate::database::repositories::SettingsRepository;
use crate::models::setting::{keys, HomepageSettings, PageContent, StaticPages};
use crate::utils::errors::Result;

const HOMEPAGE_KEYS: [&str; 5] = [
    keys::HERO_TITLE,
    keys::HERO_SUBTITLE,
    keys::HERO_BUTTON_TEXT,
    keys::CTA_TITLE,
    keys::CTA_SUBTITLE,
];

const PAGE_KEYS: [&str; 3] = [keys::PAGE_ABOUT, keys::PAGE_CREDIT, keys::PAGE_LEASING];

#[derive(Debug, Clone)]
pub struct ContentService {
    settings: SettingsRepository,
}

impl ContentService {
    pub fn new(settings: SettingsRepository) -> Self {
        Self { settings }
    }

    /// Homepage copy; keys that are missing or blank keep their default text
    pub async fn load_homepage(&self) -> Result<HomepageSettings> {
        let values = try_join_all(HOMEPAGE_KEYS.iter().map(|key| self.settings.get(key))).await?;
        let mut texts = values.into_iter().map(non_blank_text);

        let defaults = HomepageSettings::default();
        let mut next = |fallback: String| texts.next().flatten().unwrap_or(fallback);
        Ok(HomepageSettings {
            hero_title: next(defaults.hero_title),
            hero_subtitle: next(defaults.hero_subtitle),
            hero_button_text: next(defaults.hero_button_text),
            cta_title: next(defaults.cta_title),
            cta_subtitle: next(defaults.cta_subtitle),
        })
    }

    pub async fn save_homepage(&self, homepage: &HomepageSettings) -> Result<()> {
        let values = [
            &homepage.hero_title,
            &homepage.hero_subtitle,
            &homepage.hero_button_text,
            &homepage.cta_title,
            &homepage.cta_subtitle,
        ];

        try_join_all(
            HOMEPAGE_KEYS
                .iter()
                .zip(values)
                .map(|(key, text)| self.settings.set(key, Value::String(text.clone()))),
        )
        .await?;

        debug!(keys = HOMEPAGE_KEYS.len(), "Homepage copy saved");
        Ok(())
    }

    /// Static pages; a page never saved, or stored in an unexpected shape, keeps its default copy
    pub async fn load_pages(&self) -> Result<StaticPages> {
        let mut pages = try_join_all(PAGE_KEYS.iter().map(|key| self.settings.get_as::<PageContent>(key)))
            .await?
            .into_iter();

        let defaults = StaticPages::default();
        let mut next = |fallback: PageContent| pages.next().flatten().unwrap_or(fallback);
        Ok(StaticPages {
            about: next(defaults.about),
            credit: next(defaults.credit),
            leasing: next(defaults.leasing),
        })
    }

    pub async fn save_pages(&self, pages: &StaticPages) -> Result<()> {
        let contents = [&pages.about, &pages.credit, &pages.leasing];
        try_join_all(
            PAGE_KEYS
                .iter()
                .zip(contents)
                .map(|(key, page)| self.settings.set_as(key, page)),
        )
        .await?;

        debug!(keys = PAGE_KEYS.len(), "Static pages saved");
        Ok(())
    }
}

fn non_blank_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}
