pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::{create_pool, DbPool};
pub use state::{AppOptions, AppState, Repositories};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::list_categories,
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::update_item,
        handlers::cart::remove_item,
        handlers::cart::clear_cart,
        handlers::checkout::start,
        handlers::checkout::get,
        handlers::checkout::submit_shipping,
        handlers::checkout::back,
        handlers::checkout::pay,
        handlers::checkout::discard,
        handlers::notifications::list,
        handlers::notifications::dismiss,
        handlers::notifications::invoke_action,
        handlers::auth::register,
        handlers::auth::verify,
        handlers::auth::resend,
        handlers::auth::login,
        handlers::auth::update_profile,
        handlers::admin::login,
        handlers::admin::logout,
        handlers::admin::create_product,
        handlers::admin::update_product,
        handlers::admin::delete_product,
        handlers::admin::create_category,
        handlers::admin::update_category,
        handlers::admin::delete_category,
    ),
    tags(
        (name = "catalog", description = "Products and categories"),
        (name = "cart", description = "Per-user shopping cart"),
        (name = "checkout", description = "Shipping, payment and confirmation"),
        (name = "notifications", description = "Transient user messages"),
        (name = "auth", description = "Client registration and sign-in"),
        (name = "admin", description = "Catalog management"),
    )
)]
pub struct ApiDoc;

/// Register every route on `cfg`. Shared by the server and HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{admin, auth, cart, catalog, checkout, notifications};

    cfg.route("/products", web::get().to(catalog::list_products))
        .route("/products/{id}", web::get().to(catalog::get_product))
        .route("/categories", web::get().to(catalog::list_categories))
        .service(
            web::scope("/cart/{user_id}")
                .route("", web::get().to(cart::get_cart))
                .route("/items", web::post().to(cart::add_item))
                .route("/items/{entry_id}", web::patch().to(cart::update_item))
                .route("/items/{entry_id}", web::delete().to(cart::remove_item))
                .route("/clear", web::post().to(cart::clear_cart)),
        )
        .service(
            web::scope("/checkout/{user_id}")
                .route("", web::post().to(checkout::start))
                .route("", web::get().to(checkout::get))
                .route("", web::delete().to(checkout::discard))
                .route("/shipping", web::post().to(checkout::submit_shipping))
                .route("/back", web::post().to(checkout::back))
                .route("/payment", web::post().to(checkout::pay)),
        )
        .service(
            web::scope("/notifications")
                .route("", web::get().to(notifications::list))
                .route("/{id}", web::delete().to(notifications::dismiss))
                .route(
                    "/{id}/actions/{label}",
                    web::post().to(notifications::invoke_action),
                ),
        )
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/verify", web::post().to(auth::verify))
                .route("/resend", web::post().to(auth::resend))
                .route("/login", web::post().to(auth::login)),
        )
        .route("/users/{id}", web::patch().to(auth::update_profile))
        .service(
            web::scope("/admin")
                .route("/login", web::post().to(admin::login))
                .route("/logout", web::post().to(admin::logout))
                .route("/products", web::post().to(admin::create_product))
                .route("/products/{id}", web::patch().to(admin::update_product))
                .route("/products/{id}", web::delete().to(admin::delete_product))
                .route("/categories", web::post().to(admin::create_category))
                .route("/categories/{id}", web::patch().to(admin::update_category))
                .route("/categories/{id}", web::delete().to(admin::delete_category)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
