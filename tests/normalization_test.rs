//! Property tests for the pure normalization helpers

use proptest::prelude::*;
use DealerDesk::models::validation::normalize_image_urls;
use DealerDesk::services::storage::{object_path, sanitize_file_name};

fn url_or_blank() -> impl Strategy<Value = String> {
    prop_oneof![
        "https://cdn\\.example\\.com/[a-z0-9]{1,8}\\.jpg",
        Just(String::new()),
        " {1,3}",
    ]
}

proptest! {
    #[test]
    fn normalize_drops_blanks_and_keeps_order(urls in prop::collection::vec(url_or_blank(), 0..12)) {
        let normalized = normalize_image_urls(&urls);
        let expected: Vec<String> = urls.iter().filter(|u| !u.trim().is_empty()).cloned().collect();
        prop_assert_eq!(normalized, expected);
    }

    #[test]
    fn sanitized_names_use_safe_characters(name in "\\PC{0,40}") {
        let sanitized = sanitize_file_name(&name);
        prop_assert_eq!(sanitized.chars().count(), name.chars().count());
        prop_assert!(sanitized.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'));
    }

    #[test]
    fn object_paths_stay_in_folder(name in "[a-zA-Z0-9 _.-]{1,20}") {
        let path = object_path("cars", &name);
        prop_assert!(path.starts_with("cars/"));
        prop_assert!(path.ends_with(&sanitize_file_name(&name)));
        prop_assert_eq!(path.matches('/').count(), 1);
    }
}

#[test]
fn test_normalize_examples() {
    assert!(normalize_image_urls(Vec::<String>::new()).is_empty());
    assert_eq!(normalize_image_urls(["a", "", "b"]), vec!["a", "b"]);
}
