//! Request builders with realistic values

use DealerDesk::models::lead::{CreateContactFormRequest, CreateLeadRequest};
use DealerDesk::models::partner::{CreateBankRequest, CreateLeasingCompanyRequest};
use DealerDesk::models::review::{CreateReviewRequest, CreateStoryRequest};
use DealerDesk::models::{CreateListingRequest, ListingDraft};
use std::collections::BTreeMap;

pub fn listing_request(make: &str, model: &str, price: f64) -> CreateListingRequest {
    CreateListingRequest {
        make: make.to_string(),
        model: model.to_string(),
        year: 2019,
        price,
        mileage: Some(87_000),
        engine_volume: Some("2.0".to_string()),
        fuel_type: Some("Дизель".to_string()),
        transmission: Some("Автомат".to_string()),
        drive_train: None,
        body_type: Some("Универсал".to_string()),
        color: Some("Серый".to_string()),
        description: None,
        image_urls: Vec::new(),
        is_available: true,
        specifications: BTreeMap::new(),
        features: vec!["Климат-контроль".to_string()],
    }
}

pub fn listing_draft(make: &str, model: &str, price: &str) -> ListingDraft {
    ListingDraft {
        make: make.to_string(),
        model: model.to_string(),
        year: "2020".to_string(),
        price: price.to_string(),
        ..ListingDraft::default()
    }
}

pub fn lead_request(name: &str) -> CreateLeadRequest {
    CreateLeadRequest {
        name: name.to_string(),
        phone: "+375291234567".to_string(),
        email: None,
        message: Some("Интересует кредит".to_string()),
        car_id: None,
        status: None,
    }
}

pub fn contact_form_request(name: &str) -> CreateContactFormRequest {
    CreateContactFormRequest {
        name: name.to_string(),
        phone: "+375447654321".to_string(),
        message: "Перезвоните, пожалуйста".to_string(),
        status: None,
    }
}

pub fn review_request(rating: i16) -> CreateReviewRequest {
    CreateReviewRequest {
        name: "Ольга".to_string(),
        content: "Быстро оформили покупку".to_string(),
        rating,
        is_published: None,
    }
}

pub fn story_request(title: &str) -> CreateStoryRequest {
    CreateStoryRequest {
        title: title.to_string(),
        content: "Подобрали машину за неделю".to_string(),
        image_url: None,
        is_published: None,
    }
}

pub fn bank_request(name: &str, order_index: i32) -> CreateBankRequest {
    CreateBankRequest {
        name: name.to_string(),
        logo_url: None,
        description: None,
        min_rate: 11.5,
        max_rate: 19.0,
        min_amount: 1_000.0,
        max_amount: 80_000.0,
        min_term_months: 6,
        max_term_months: 84,
        features: vec!["Без первого взноса".to_string()],
        requirements: vec!["Паспорт".to_string()],
        is_active: true,
        order_index,
    }
}

pub fn leasing_request(name: &str, order_index: i32) -> CreateLeasingCompanyRequest {
    CreateLeasingCompanyRequest {
        name: name.to_string(),
        logo_url: None,
        description: None,
        min_rate: 3.0,
        max_rate: 9.0,
        min_advance_percent: 10.0,
        max_advance_percent: 50.0,
        min_term_months: 12,
        max_term_months: 60,
        features: Vec::new(),
        requirements: Vec::new(),
        is_active: true,
        order_index,
    }
}
