use dioxus::prelude::*;

use ui::{AdminDashboard, AdminIndex, AdminLogin, SurveyWizard};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    SurveyWizard {},
    #[route("/admin")]
    AdminIndex {},
    #[route("/admin/login")]
    AdminLogin {},
    #[route("/admin/dashboard")]
    AdminDashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[cfg(feature = "server")]
fn main() -> anyhow::Result<()> {
    tokio::runtime::Runtime::new()?.block_on(launch_server())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use api::auth::AdminCredentials;
    use axum::Extension;
    use api::db::{Database, PgSurveyStore};
    use api::{protect, router, AppState, Settings};
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::SameSite;
    use tower_sessions::SessionManagerLayer;
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("Invalid configuration")?;

    // Opened eagerly: an unreachable database aborts startup.
    let database = Arc::new(Database::new(settings.database.clone()));
    let pool = database
        .handle()
        .await
        .context("Failed to connect to database")?;

    api::db::migrate(pool)
        .await
        .context("Failed to run migrations")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to create session table")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure_cookies())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_signed(settings.session.signing_key());

    let state = AppState {
        store: Arc::new(PgSurveyStore::new(database.clone())),
    };
    let credentials = Arc::new(AdminCredentials::from(&settings.admin));

    // API routes first, then the Dioxus app and its server functions; the
    // guard sees every request and the session layer wraps both.
    let app = protect(router(state).serve_dioxus_application(ServeConfig::new(), App))
        .layer(Extension(credentials))
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "استبيان توهاتسو" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::SURVEY_CSS }

        Router::<Route> {}
    }
}
