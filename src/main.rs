use std::sync::Arc;
use actix_cors::Cors;
use actix_web::{App, HttpServer};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use dotenv::dotenv;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use bug_tracker::api::{self, ApiDoc};
use bug_tracker::configuration::Settings;
use bug_tracker::db::init_db;
use bug_tracker::service::BugService;
use bug_tracker::store::{BugStore, InMemoryBugStore, SeaOrmBugStore};
use bug_tracker::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let settings = Settings::from_env()?;

    let subscriber = get_subscriber(
        "bug_tracker".into(),
        settings.log_filter.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber)?;

    info!("starting bug tracker...");

    let store: Arc<dyn BugStore> = match &settings.database {
        Some(database) => Arc::new(SeaOrmBugStore::new(init_db(database).await?)),
        None => {
            warn!("DATABASE_URL is not set, bugs are kept in memory only");
            Arc::new(InMemoryBugStore::new())
        }
    };
    let service = Data::new(BugService::new(store));

    let address = (settings.application.host.clone(), settings.application.port);
    info!("listening on http://{}:{}", address.0, address.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(service.clone())
            .service(api::health_check)
            .configure(api::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
        .bind(address)?
        .run()
        .await?;

    Ok(())
}
