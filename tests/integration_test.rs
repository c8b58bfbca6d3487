//! End-to-end behaviour of the admin actions over the in-process store and bucket

mod helpers;

use helpers::*;
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;
use DealerDesk::database::Table;
use DealerDesk::handlers::{content, inbox, listings, partners, reviews};
use DealerDesk::models::lead::{LeadStatus, ContactFormStatus};
use DealerDesk::models::setting::keys;
use DealerDesk::models::{HomepageSettings, UpdateListingRequest};
use DealerDesk::services::ImageFile;
use DealerDesk::{DealerDeskError, Notice};

#[tokio::test]
async fn test_listing_images_are_compacted_on_save() {
    let ctx = TestContext::new();
    let mut draft = listing_draft("Skoda", "Octavia", "15500");
    draft.image_urls = vec![
        "https://cdn.example.com/a.jpg".to_string(),
        String::new(),
        "  ".to_string(),
        "https://cdn.example.com/b.jpg".to_string(),
    ];

    assert!(listings::save_listing(&ctx.admin, None, draft).await.is_success());

    let saved = listings::load_listings(&ctx.admin).await.unwrap().remove(0);
    assert_eq!(
        saved.image_urls,
        vec!["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]
    );

    // Only the edit form gets the placeholder slot back
    let mut draft = listings::edit_listing(&ctx.admin, saved.id).await.unwrap();
    draft.image_urls = vec![String::new()];
    assert!(listings::save_listing(&ctx.admin, Some(saved.id), draft).await.is_success());
    let saved = ctx.admin.db.listings.get_by_id(saved.id).await.unwrap().unwrap();
    assert!(saved.image_urls.is_empty());
    assert_eq!(
        listings::edit_listing(&ctx.admin, saved.id).await.unwrap().image_urls,
        vec![String::new()]
    );
}

#[tokio::test]
async fn test_unparseable_draft_is_rejected_before_any_write() {
    let ctx = TestContext::new();
    let draft = listing_draft("BMW", "X5", "дорого");

    let notice = listings::save_listing(&ctx.admin, None, draft).await;

    assert_eq!(
        notice,
        Notice::Invalid("price must be a number, got \"дорого\"".to_string())
    );
    assert_eq!(ctx.store.count(Table::Cars).await, 0);
}

#[tokio::test]
async fn test_edit_clears_optional_fields() {
    let ctx = TestContext::new();
    let mut draft = listing_draft("Volvo", "XC60", "31000");
    draft.color = "Синий".to_string();
    draft.description = "Один владелец".to_string();
    assert!(listings::save_listing(&ctx.admin, None, draft).await.is_success());
    let listing = listings::load_listings(&ctx.admin).await.unwrap().remove(0);
    assert_eq!(listing.color.as_deref(), Some("Синий"));

    let mut draft = listings::edit_listing(&ctx.admin, listing.id).await.unwrap();
    draft.color.clear();
    draft.description = "  ".to_string();
    assert!(listings::save_listing(&ctx.admin, Some(listing.id), draft).await.is_success());

    let listing = ctx.admin.db.listings.get_by_id(listing.id).await.unwrap().unwrap();
    assert_eq!(listing.color, None);
    assert_eq!(listing.description, None);
    assert_eq!(listing.make, "Volvo");

    let mut story = story_request("Семейный универсал");
    story.image_url = Some("https://cdn.example.com/story.jpg".to_string());
    assert!(reviews::save_story(&ctx.admin, None, story).await.is_success());
    let saved = reviews::load_stories(&ctx.admin).await.unwrap().remove(0);
    assert!(saved.image_url.is_some());

    let notice = reviews::save_story(&ctx.admin, Some(saved.id), story_request("Семейный универсал")).await;
    assert!(notice.is_success());
    let story = ctx.admin.db.stories.get_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(story.image_url, None);
}

#[tokio::test]
async fn test_settings_overwrite_keeps_single_row() {
    let ctx = TestContext::new();
    let settings = &ctx.admin.db.settings;

    settings.set(keys::HERO_TITLE, json!("Первый")).await.unwrap();
    settings.set(keys::HERO_TITLE, json!("Второй")).await.unwrap();

    assert_eq!(settings.get(keys::HERO_TITLE).await.unwrap(), Some(json!("Второй")));
    assert_eq!(ctx.store.count(Table::Settings).await, 1);
    assert_eq!(settings.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_homepage_fan_out_keeps_partial_writes() {
    let ctx = TestContext::new();
    ctx.store
        .reject_writes_where(Table::Settings, "key", keys::CTA_SUBTITLE)
        .await;

    let homepage = HomepageSettings {
        hero_title: "Авто с пробегом".to_string(),
        ..HomepageSettings::default()
    };
    let notice = content::save_homepage(&ctx.admin, &homepage).await;

    assert_eq!(notice, Notice::Failure("Ошибка сохранения настроек".to_string()));
    assert_eq!(
        ctx.admin.db.settings.get(keys::HERO_TITLE).await.unwrap(),
        Some(json!("Авто с пробегом"))
    );
    assert_eq!(ctx.admin.db.settings.get(keys::CTA_SUBTITLE).await.unwrap(), None);
}

#[tokio::test]
async fn test_submitted_lead_starts_new() {
    let ctx = TestContext::new();
    let mut request = lead_request("Игорь");
    request.status = Some(LeadStatus::Closed);

    assert!(inbox::submit_lead(&ctx.admin, request).await.is_success());
    assert!(inbox::submit_contact_form(&ctx.admin, contact_form_request("Вера")).await.is_success());

    let leads = inbox::load_leads(&ctx.admin).await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].status, LeadStatus::New);

    let forms = inbox::load_contact_forms(&ctx.admin).await.unwrap();
    assert_eq!(forms[0].status, ContactFormStatus::New);
}

#[tokio::test]
async fn test_review_published_unless_told_otherwise() {
    let ctx = TestContext::new();

    assert!(reviews::save_review(&ctx.admin, None, review_request(5)).await.is_success());
    let review = reviews::load_reviews(&ctx.admin).await.unwrap().remove(0);
    assert!(review.is_published);

    assert!(reviews::save_story(&ctx.admin, None, story_request("Первая машина")).await.is_success());
    assert_eq!(ctx.admin.db.stories.get_published().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_partners_sorted_by_order_index() {
    let ctx = TestContext::new();
    for (name, index) in [("Третий", 3), ("Первый", 1), ("Второй", 2)] {
        assert!(partners::save_bank(&ctx.admin, None, bank_request(name, index)).await.is_success());
        assert!(partners::save_leasing_company(&ctx.admin, None, leasing_request(name, index))
            .await
            .is_success());
    }

    let banks = partners::load_banks(&ctx.admin).await.unwrap();
    let names: Vec<_> = banks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Первый", "Второй", "Третий"]);

    let companies = partners::load_leasing_companies(&ctx.admin).await.unwrap();
    let indices: Vec<_> = companies.iter().map(|c| c.order_index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_missing_contacts_are_an_empty_state() {
    let ctx = TestContext::new();

    assert_eq!(ctx.admin.db.contacts.get().await.unwrap(), None);
    assert!(content::load_contacts(&ctx.admin).await.is_ok());
}

#[tokio::test]
async fn test_deleting_listing_leaves_images_and_leads() {
    let ctx = TestContext::new();
    let mut draft = listing_draft("Audi", "A6", "21000");
    let files = [ImageFile::new("front.jpg", "image/jpeg", vec![1, 2, 3])];
    assert!(listings::upload_listing_images(&ctx.admin, &mut draft, &files).await.is_success());
    assert!(listings::save_listing(&ctx.admin, None, draft).await.is_success());
    assert!(inbox::submit_lead(&ctx.admin, lead_request("Павел")).await.is_success());

    let listing = listings::load_listings(&ctx.admin).await.unwrap().remove(0);
    assert!(listings::delete_listing(&ctx.admin, listing.id).await.is_success());

    assert!(listings::load_listings(&ctx.admin).await.unwrap().is_empty());
    assert_eq!(ctx.bucket.paths().await.len(), 1);
    assert_eq!(ctx.store.count(Table::Leads).await, 1);
}

#[tokio::test]
async fn test_deleting_missing_listing_is_reported() {
    let ctx = TestContext::new();

    let err = ctx.admin.db.listings.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DealerDeskError::Store(ref e) if e.is_no_rows()));

    let notice = listings::delete_listing(&ctx.admin, Uuid::new_v4()).await;
    assert_eq!(notice, Notice::Failure("Ошибка удаления автомобиля".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_price_updates_last_write_wins() {
    let ctx = TestContext::new();
    let listing = ctx
        .admin
        .db
        .listings
        .create(listing_request("Volkswagen", "Passat", 50.0))
        .await
        .unwrap();
    let id = listing.id;

    for _ in 0..20 {
        let handles: Vec<_> = [100.0, 200.0]
            .into_iter()
            .map(|price| {
                let repository = ctx.admin.db.listings.clone();
                tokio::spawn(async move {
                    let patch = UpdateListingRequest {
                        price: Some(price),
                        ..UpdateListingRequest::default()
                    };
                    repository.update(id, patch).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = ctx.admin.db.listings.get_by_id(id).await.unwrap().unwrap();
        assert!(stored.price == 100.0 || stored.price == 200.0, "got {}", stored.price);
        assert_eq!(stored.make, "Volkswagen");
        assert_eq!(stored.mileage, Some(87_000));
    }
    assert_eq!(ctx.store.count(Table::Cars).await, 1);
}

#[tokio::test]
async fn test_store_outage_surfaces_generic_failure() {
    let ctx = TestContext::new();
    ctx.store.set_offline(true).await;

    assert_eq!(
        listings::load_listings(&ctx.admin).await.unwrap_err(),
        Notice::Failure("Ошибка загрузки автомобилей".to_string())
    );
    assert_eq!(
        inbox::submit_lead(&ctx.admin, lead_request("Олег")).await,
        Notice::Failure("Ошибка отправки заявки".to_string())
    );

    ctx.store.set_offline(false).await;
    assert!(listings::load_listings(&ctx.admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_upload_leaves_draft_unchanged() {
    let ctx = TestContext::new();
    ctx.bucket.fail_uploads_containing("broken").await;
    let mut draft = listing_draft("Kia", "Rio", "9000");
    let before = draft.clone();

    let files = [
        ImageFile::new("ok.jpg", "image/jpeg", vec![1]),
        ImageFile::new("broken.jpg", "image/jpeg", vec![2]),
    ];
    let notice = listings::upload_listing_images(&ctx.admin, &mut draft, &files).await;

    assert_eq!(notice, Notice::Failure("Ошибка загрузки изображений".to_string()));
    assert_eq!(draft, before);
}

#[tokio::test]
async fn test_same_file_name_uploads_do_not_collide() {
    let ctx = TestContext::new();
    let mut draft = listing_draft("Kia", "Ceed", "11000");
    let files = [
        ImageFile::new("photo 1.jpg", "image/jpeg", vec![1]),
        ImageFile::new("photo 1.jpg", "image/jpeg", vec![2]),
    ];

    assert!(listings::upload_listing_images(&ctx.admin, &mut draft, &files).await.is_success());

    assert_eq!(draft.image_urls.len(), 2);
    assert_ne!(draft.image_urls[0], draft.image_urls[1]);
    let paths = ctx.bucket.paths().await;
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.starts_with("cars/") && p.ends_with("_photo_1.jpg")));
}

#[tokio::test]
async fn test_removing_foreign_image_only_clears_slot() {
    let ctx = TestContext::new();
    let mut draft = listing_draft("Mazda", "6", "14000");
    draft.image_urls = vec!["https://elsewhere.example.com/car.jpg".to_string()];

    let notice = listings::remove_listing_image(&ctx.admin, &mut draft, 0).await;

    assert!(notice.is_success());
    assert_eq!(draft.image_urls, vec![String::new()]);
}

#[tokio::test]
#[serial]
async fn test_listing_save_notifies_cache() {
    let (ctx, server) = TestContext::with_cache_server().await;

    assert!(listings::save_listing(&ctx.admin, None, listing_draft("Toyota", "Camry", "27000"))
        .await
        .is_success());

    let requests = wait_for_requests(&server, 1).await;
    assert_eq!(requests.len(), 1);
    let listing = listings::load_listings(&ctx.admin).await.unwrap().remove(0);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({"collection": "cars", "documentId": listing.id.to_string(), "action": "create"})
    );
    let authorization = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert_eq!(authorization, format!("Bearer {}", CACHE_KEY));
}

#[tokio::test]
#[serial]
async fn test_failed_write_sends_no_notification() {
    let (ctx, server) = TestContext::with_cache_server().await;
    ctx.store.set_offline(true).await;

    let notice = reviews::save_review(&ctx.admin, None, review_request(4)).await;
    assert!(!notice.is_success());

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_cache_outage_does_not_fail_write() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .respond_with(wiremock::ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let config = DealerDesk::config::CacheConfig {
        enabled: true,
        endpoint: format!("{}{}", server.uri(), CACHE_PATH),
        api_key: Some(CACHE_KEY.to_string()),
        timeout_seconds: 2,
    };
    let notifier = DealerDesk::services::CacheNotifier::new(&config).unwrap();
    let ctx = TestContext::with_notifier(notifier);

    let notice = partners::save_bank(&ctx.admin, None, bank_request("Банк", 1)).await;

    assert_eq!(notice, Notice::Success("Банк сохранен".to_string()));
    assert_eq!(wait_for_requests(&server, 1).await.len(), 1);
    assert_eq!(partners::load_banks(&ctx.admin).await.unwrap().len(), 1);
}
