use std::sync::Arc;

use actix_web::web;
use storefront::config::Settings;
use storefront::infrastructure::credentials::ConfiguredAdmin;
use storefront::infrastructure::mailer::EmailJsMailer;
use storefront::{build_server, create_pool, run_migrations, AppOptions, AppState, Repositories};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let pool = create_pool(&settings.database_url).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState::new(
        Repositories::postgres(pool),
        Arc::new(ConfiguredAdmin::new(
            settings.admin_email.clone(),
            settings.admin_password.clone(),
        )),
        Arc::new(EmailJsMailer::new(settings.emailjs.clone())),
        AppOptions::from(&settings),
    ));

    log::info!(
        "Starting server at http://{}:{} (docs at /swagger-ui/)",
        settings.host,
        settings.port
    );

    build_server(state, &settings.host, settings.port)?.await
}
