use crate::configuration::{ApplicationSettings, Configuration, DatabaseConfigs, PersistenceBackend};
use crate::repository::{InMemoryUserStore, PgUserStore, UserStore};
use crate::routes::{SPACES_ROUTE, health_check, list_spaces, user_routes};
use crate::views::{HtmlViews, ViewRenderer};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Configuration) -> Result<Self, anyhow::Error> {
        let store: Arc<dyn UserStore> = match config.database.backend {
            PersistenceBackend::Postgres => {
                let pool = get_connection_pool(&config.database);
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to migrate the database")?;
                Arc::new(PgUserStore::new(pool))
            }
            PersistenceBackend::Memory => Arc::new(InMemoryUserStore::new()),
        };
        tracing::info!(backend = ?config.database.backend, "User store selected");

        Self::build_with(&config.application, store, Arc::new(HtmlViews)).await
    }

    /// Builds the application around an already constructed store and view renderer.
    pub async fn build_with(
        settings: &ApplicationSettings,
        store: Arc<dyn UserStore>,
        views: Arc<dyn ViewRenderer>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", settings.host, settings.port);
        let listener = TcpListener::bind(address)
            .with_context(|| "Failed to bind TCP listener for application")?;
        let port = listener
            .local_addr()
            .with_context(|| "Failed to read local address of TCP listener")?
            .port();
        let server = run(listener, store, views).context("Failed to run Actix web server")?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        self.server.await.context("Server stopped with an error")
    }
}

pub fn get_connection_pool(config: &DatabaseConfigs) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(config.connect_options())
}

fn run(
    tcp_listener: TcpListener,
    store: Arc<dyn UserStore>,
    views: Arc<dyn ViewRenderer>,
) -> Result<Server, anyhow::Error> {
    let store = web::Data::from(store);
    let views = web::Data::from(views);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_routes)
            .app_data(store.clone())
            .app_data(views.clone())
    })
    .listen(tcp_listener)
    .with_context(|| "Failed to bind Actix server to TCP listener")?
    .run();

    Ok(server)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .route(SPACES_ROUTE, web::get().to(list_spaces))
        .configure(user_routes);
}
