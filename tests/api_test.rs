//! HTTP tests against the full route table, backed by the in-memory store.

use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::{json, Value};
use uuid::Uuid;

use storefront::configure;
use storefront::domain::catalog::{CategoryInput, Product, ProductInput};
use storefront::domain::ports::{CategoryRepository, ProductRepository, VerificationMailer};
use storefront::infrastructure::credentials::ConfiguredAdmin;
use storefront::infrastructure::memory::InMemoryStore;
use storefront::{AppOptions, AppState, Repositories};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin-secret";

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    fn last_code(&self) -> String {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|(_, code)| code.clone())
            .expect("no code was sent")
    }
}

#[async_trait]
impl VerificationMailer for RecordingMailer {
    async fn send_verification_code(&self, email: &str, _name: &str, code: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        true
    }
}

fn state(store: &InMemoryStore, mailer: Arc<RecordingMailer>) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Repositories::in_memory(store.clone()),
        Arc::new(ConfiguredAdmin::new(ADMIN_EMAIL, ADMIN_PASSWORD)),
        mailer,
        AppOptions {
            page_size: 2,
            payment_delay: Duration::ZERO,
            bcrypt_cost: 4,
            ..AppOptions::default()
        },
    ))
}

async fn seed_product(store: &InMemoryStore, name: &str, price: &str, stock: i32) -> Product {
    ProductRepository::create(
        store,
        ProductInput {
            name: name.to_string(),
            description: format!("{name} description"),
            price: BigDecimal::from_str(price).unwrap(),
            stock,
            image_url: String::new(),
            category_id: Uuid::new_v4(),
        },
    )
    .await
    .unwrap()
}

fn notification_messages(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap().to_string())
        .collect()
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn products_are_filtered_and_paginated() {
    let store = InMemoryStore::new();
    for name in ["Red Tee", "Blue Tee", "Green Tee", "Mug", "Red Cap"] {
        seed_product(&store, name, "10.00", 5).await;
    }
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/products?page=3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_items"], 5);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["page"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["has_next"], false);

    let req = test::TestRequest::get()
        .uri("/products?search=tee&page_size=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_items"], 3);

    // Out-of-range pages stay on page 1.
    let req = test::TestRequest::get().uri("/products?page=9").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"], 1);
}

#[actix_web::test]
async fn unknown_product_is_404() {
    let store = InMemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/products/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unavailable_store_is_503() {
    let store = InMemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    store.set_unavailable(true);

    let req = test::TestRequest::get().uri("/categories").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let req = test::TestRequest::get()
        .uri(&format!("/cart/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let req = test::TestRequest::get().uri("/notifications").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(notification_messages(&body).contains(&"Could not load the cart".to_string()));
}

// ── Cart ─────────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn adding_twice_merges_and_stock_is_enforced() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 3).await;
    let mug = seed_product(&store, "Mug", "10.00", 10).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    let user = Uuid::new_v4();
    let items_uri = format!("/cart/{user}/items");

    for body in [
        json!({ "product_id": tee.id }),
        json!({ "product_id": tee.id }),
        json!({ "product_id": mug.id, "quantity": 1 }),
    ] {
        let req = test::TestRequest::post()
            .uri(&items_uri)
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri(&format!("/cart/{user}")).to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["total"], "61.98");
    assert_eq!(cart["item_count"], 3);

    // Two more would make 4 of a product with stock 3.
    let req = test::TestRequest::post()
        .uri(&items_uri)
        .set_json(json!({ "product_id": tee.id, "quantity": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/notifications").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(notification_messages(&body)
        .contains(&"Could not add the product to the cart".to_string()));
}

#[actix_web::test]
async fn quantity_zero_removes_and_foreign_entries_are_hidden() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 5).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{alice}/items"))
        .set_json(json!({ "product_id": tee.id, "quantity": 2 }))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    let entry_id = cart["items"][0]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/cart/{bob}/items/{entry_id}"))
        .set_json(json!({ "quantity": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::patch()
        .uri(&format!("/cart/{alice}/items/{entry_id}"))
        .set_json(json!({ "quantity": 0 }))
        .to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert!(cart["items"].as_array().unwrap().is_empty());
    assert_eq!(cart["item_count"], 0);
}

#[actix_web::test]
async fn clearing_waits_for_confirmation() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 5).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    let user = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{user}/items"))
        .set_json(json!({ "product_id": tee.id }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{user}/clear"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let pending: Value = test::read_body_json(resp).await;
    let notification_id = pending["notification_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri(&format!("/cart/{user}")).to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["item_count"], 1);

    let req = test::TestRequest::post()
        .uri(&format!("/notifications/{notification_id}/actions/Confirm"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let mut emptied = false;
    for _ in 0..50 {
        let req = test::TestRequest::get().uri(&format!("/cart/{user}")).to_request();
        let cart: Value = test::call_and_read_body_json(&app, req).await;
        if cart["item_count"] == 0 {
            emptied = true;
            break;
        }
        actix_web::rt::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(emptied, "cart was not cleared after confirmation");
}

// ── Checkout ─────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn checkout_runs_from_shipping_to_confirmation() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 5).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    let user = Uuid::new_v4();
    let checkout = format!("/checkout/{user}");

    // Empty cart never enters the flow.
    let req = test::TestRequest::post().uri(&checkout).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{user}/items"))
        .set_json(json!({ "product_id": tee.id }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post().uri(&checkout).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let payment = json!({ "card_number": "4111111111111111", "expiry": "1228", "cvv": "123" });
    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/payment"))
        .set_json(&payment)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/shipping"))
        .set_json(json!({ "name": "Ana", "address": "", "city": "Lisbon", "phone": "555" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/shipping"))
        .set_json(json!({ "name": "Ana", "address": "Rua 1", "city": "Lisbon", "phone": "555" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["step"], "payment");

    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/payment"))
        .set_json(&payment)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["step"], "confirmation");
    assert_eq!(body["processing"], false);
    assert_eq!(body["card_last4"], "1111");

    let req = test::TestRequest::get().uri(&format!("/cart/{user}")).to_request();
    let cart: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cart["item_count"], 0);

    let req = test::TestRequest::get().uri("/notifications").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(notification_messages(&body).contains(&"Order placed successfully!".to_string()));

    let req = test::TestRequest::delete().uri(&checkout).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&checkout).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn back_returns_to_shipping_with_data_kept() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 5).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    let user = Uuid::new_v4();
    let checkout = format!("/checkout/{user}");

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{user}/items"))
        .set_json(json!({ "product_id": tee.id }))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post().uri(&checkout).to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/shipping"))
        .set_json(json!({ "name": "Ana", "address": "Rua 1", "city": "Lisbon", "phone": "555" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/back"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["step"], "shipping");
    assert_eq!(body["shipping"]["city"], "Lisbon");
}

#[actix_web::test]
async fn restarting_checkout_is_refused_while_payment_runs() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 5).await;
    let state = web::Data::new(AppState::new(
        Repositories::in_memory(store.clone()),
        Arc::new(ConfiguredAdmin::new(ADMIN_EMAIL, ADMIN_PASSWORD)),
        Arc::new(RecordingMailer::default()),
        AppOptions {
            payment_delay: Duration::from_millis(200),
            bcrypt_cost: 4,
            ..AppOptions::default()
        },
    ));
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;
    let user = Uuid::new_v4();
    let checkout = format!("/checkout/{user}");

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{user}/items"))
        .set_json(json!({ "product_id": tee.id }))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post().uri(&checkout).to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri(&format!("{checkout}/shipping"))
        .set_json(json!({ "name": "Ana", "address": "Rua 1", "city": "Lisbon", "phone": "555" }))
        .to_request();
    test::call_service(&app, req).await;

    let pay = test::TestRequest::post()
        .uri(&format!("{checkout}/payment"))
        .set_json(json!({ "card_number": "4111111111111111", "expiry": "1228", "cvv": "123" }))
        .to_request();
    let restart = test::TestRequest::post().uri(&checkout).to_request();
    let (paid, restarted) = tokio::join!(
        test::call_service(&app, pay),
        test::call_service(&app, restart)
    );
    assert_eq!(paid.status(), StatusCode::OK);
    assert_eq!(restarted.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri(&checkout).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["step"], "confirmation");
}

// ── Notifications ────────────────────────────────────────────────────────────

#[actix_web::test]
async fn notifications_can_be_dismissed() {
    let store = InMemoryStore::new();
    let tee = seed_product(&store, "Tee", "25.99", 5).await;
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/cart/{}/items", Uuid::new_v4()))
        .set_json(json!({ "product_id": tee.id }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/notifications").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let first = &body.as_array().unwrap()[0];
    assert_eq!(first["severity"], "success");
    assert_eq!(first["duration_ms"], 3000);
    let id = first["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/notifications/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/notifications/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT, "dismiss is idempotent");
}

// ── Auth and admin ───────────────────────────────────────────────────────────

#[actix_web::test]
async fn registration_requires_the_emailed_code() {
    let store = InMemoryStore::new();
    let mailer = Arc::new(RecordingMailer::default());
    let app = test::init_service(
        App::new()
            .app_data(state(&store, mailer.clone()))
            .configure(configure),
    )
    .await;
    let credentials = json!({ "email": "ana@example.com", "password": "secret1" });

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "name": "Ana", "email": "ana@example.com", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let code = mailer.last_code();
    let wrong = if code == "000000" { "111111" } else { "000000" };
    let req = test::TestRequest::post()
        .uri("/auth/verify")
        .set_json(json!({ "email": "ana@example.com", "code": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/auth/verify")
        .set_json(json!({ "email": "ana@example.com", "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let profile: Value = test::read_body_json(resp).await;
    let id = profile["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "ana@example.com", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{id}"))
        .set_json(json!({ "city": "Porto" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["city"], "Porto");
    assert_eq!(body["name"], "Ana");
}

#[actix_web::test]
async fn admin_routes_need_a_session_token() {
    let store = InMemoryStore::new();
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;
    let category_body = json!({ "name": "Shirts" });

    let req = test::TestRequest::post()
        .uri("/admin/categories")
        .set_json(&category_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let bearer = format!("Bearer {}", body["token"].as_str().unwrap());

    let req = test::TestRequest::post()
        .uri("/admin/categories")
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .set_json(&category_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/admin/products")
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .set_json(json!({
            "name": "Tee",
            "price": "-1",
            "stock": 3,
            "category_id": category["id"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/admin/products")
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .set_json(json!({
            "name": "Tee",
            "price": "25.99",
            "stock": 3,
            "category_id": category["id"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = test::read_body_json(resp).await;
    assert_eq!(product["price"], "25.99");

    let req = test::TestRequest::patch()
        .uri(&format!("/admin/products/{}", product["id"].as_str().unwrap()))
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .set_json(json!({ "stock": 7 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["stock"], 7);

    // Deleting the category leaves its products in the catalog.
    let req = test::TestRequest::delete()
        .uri(&format!("/admin/categories/{}", category["id"].as_str().unwrap()))
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let products = ProductRepository::list(&store).await.unwrap();
    assert_eq!(products.len(), 1);
    assert!(CategoryRepository::list(&store).await.unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/admin/logout")
        .insert_header((header::AUTHORIZATION, bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/products/{}", product["id"].as_str().unwrap()))
        .insert_header((header::AUTHORIZATION, bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn seeded_category_is_reported_with_its_products() {
    let store = InMemoryStore::new();
    let category = CategoryRepository::create(
        &store,
        CategoryInput {
            name: "Mugs".into(),
            description: String::new(),
            image_url: String::new(),
        },
    )
    .await
    .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(state(&store, Arc::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/products?category_id={}", category.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["category"]["name"], "Mugs");
    assert_eq!(body["total_items"], 0);
    assert_eq!(body["total_pages"], 0);
}
