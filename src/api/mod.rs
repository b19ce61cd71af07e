mod bug;
mod health;

use actix_web::{error, web, HttpRequest};
use utoipa::OpenApi;
use crate::entity::bug::{Severity, Status};
use crate::model::bug::{BugRequest, BugResponse};
use crate::model::global_error::{AppError, ErrorCode};

pub use crate::api::bug::{create_bug, delete_bug, get_bug, list_bugs, update_bug};
pub use crate::api::health::health_check;

#[derive(OpenApi)]
#[openapi(
    paths(
        bug::list_bugs,
        bug::get_bug,
        bug::create_bug,
        bug::update_bug,
        bug::delete_bug,
        health::health_check,
    ),
    components(schemas(BugRequest, BugResponse, Severity, Status)),
    tags(
        (name = "bugs", description = "Bug record lifecycle"),
    ),
)]
pub struct ApiDoc;

/// Registers the `/api` scope. The caller provides `web::Data<BugService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .service(list_bugs)
            .service(get_bug)
            .service(create_bug)
            .service(update_bug)
            .service(delete_bug),
    );
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::with_detail(ErrorCode::InvalidRequestBody, err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::with_detail(ErrorCode::InvalidQueryString, err.to_string()).into()
}
