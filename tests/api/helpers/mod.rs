mod http;

use makersbnb::configuration::{self, DatabaseConfigs, PersistenceBackend};
use makersbnb::repository::InMemoryUserStore;
use makersbnb::startup::Application;
use makersbnb::telemetry;
use makersbnb::views::{HtmlViews, ViewRenderer};
use secrecy::Secret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub store: InMemoryUserStore,
    pub api_client: reqwest::Client,
}

static TRACING: OnceLock<()> = OnceLock::new();

pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let default_filter_level = "info".to_string();
        let subscriber_name = "test".to_string();

        if std::env::var("TEST_LOG").is_ok() {
            let subscriber = telemetry::get_subscriber(
                subscriber_name,
                default_filter_level,
                std::io::stdout,
            );
            telemetry::init_subscriber(subscriber);
        } else {
            let subscriber =
                telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
            telemetry::init_subscriber(subscriber);
        };
    });
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_views(Arc::new(HtmlViews)).await
}

/// Spawns the application on a random port with a fresh, empty in-memory store.
pub async fn spawn_app_with_views(views: Arc<dyn ViewRenderer>) -> TestApp {
    init_tracing();

    let configuration = {
        let mut c = configuration::get_config().expect("Failed to read configuration.");
        c.application.port = 0;
        c
    };

    let store = InMemoryUserStore::new();
    let application =
        Application::build_with(&configuration.application, Arc::new(store.clone()), views)
            .await
            .expect("Failed to build application.");
    let port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    // Redirects are asserted on, not followed
    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        store,
        api_client,
    }
}

/// Creates a uniquely named, empty database and returns the settings pointing at it.
pub async fn create_database() -> DatabaseConfigs {
    let base = configuration::get_config()
        .expect("Failed to read configuration.")
        .database;
    let config = DatabaseConfigs {
        backend: PersistenceBackend::Postgres,
        database_name: Uuid::new_v4().to_string(),
        ..base
    };
    let maintenance_settings = DatabaseConfigs {
        database_name: "postgres".to_string(),
        username: "postgres".to_string(),
        password: Secret::new("password".to_string()),
        ..config.clone()
    };

    let mut connection = PgConnection::connect_with(&maintenance_settings.connect_options())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database.");

    config
}

/// Creates a uniquely named database and runs the migrations against it.
pub async fn configure_database() -> PgPool {
    let config = create_database().await;

    let connection_pool = PgPool::connect_with(config.connect_options())
        .await
        .expect("Failed to connect to Postgres.");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
