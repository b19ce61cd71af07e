use actix_web::{delete, get, post, put, web, HttpResponse};
use crate::model::bug::{BugQuery, BugRequest, BugResponse};
use crate::model::common::ApiResponse;
use crate::model::global_error::AppError;
use crate::service::BugService;

#[utoipa::path(
    get,
    path = "/api/bugs",
    summary = "List bugs",
    params(BugQuery),
    responses(
        (status = 200, description = "Matching bugs with their count", body = Vec<BugResponse>),
        (status = 500, description = "Storage failure"),
    ),
    tag = "bugs",
)]
#[get("/bugs")]
pub async fn list_bugs(
    service: web::Data<BugService>,
    query: web::Query<BugQuery>,
) -> Result<HttpResponse, AppError> {
    let bugs = service.list_all(&query).await?;

    let response: Vec<BugResponse> = bugs
        .into_iter()
        .map(BugResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::listed(response)))
}

#[utoipa::path(
    get,
    path = "/api/bugs/{id}",
    summary = "Get a bug",
    params(
        ("id" = String, Path, description = "Bug id"),
    ),
    responses(
        (status = 200, description = "The bug", body = BugResponse),
        (status = 404, description = "Bug not found"),
    ),
    tag = "bugs",
)]
#[get("/bugs/{id}")]
pub async fn get_bug(
    service: web::Data<BugService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bug = service.get_one(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(BugResponse::from(bug))))
}

#[utoipa::path(
    post,
    path = "/api/bugs",
    summary = "Report a bug",
    request_body = BugRequest,
    responses(
        (status = 201, description = "Bug created", body = BugResponse),
        (status = 400, description = "Validation failed"),
    ),
    tag = "bugs",
)]
#[post("/bugs")]
pub async fn create_bug(
    service: web::Data<BugService>,
    body: web::Json<BugRequest>,
) -> Result<HttpResponse, AppError> {
    let bug = service.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(
        ApiResponse::ok(BugResponse::from(bug)).with_message("Bug created successfully"),
    ))
}

#[utoipa::path(
    put,
    path = "/api/bugs/{id}",
    summary = "Replace a bug",
    params(
        ("id" = String, Path, description = "Bug id"),
    ),
    request_body = BugRequest,
    responses(
        (status = 200, description = "Bug updated", body = BugResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Bug not found"),
    ),
    tag = "bugs",
)]
#[put("/bugs/{id}")]
pub async fn update_bug(
    service: web::Data<BugService>,
    path: web::Path<String>,
    body: web::Json<BugRequest>,
) -> Result<HttpResponse, AppError> {
    let bug = service.update(&path.into_inner(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(BugResponse::from(bug)).with_message("Bug updated successfully"),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/bugs/{id}",
    summary = "Delete a bug",
    params(
        ("id" = String, Path, description = "Bug id"),
    ),
    responses(
        (status = 200, description = "Bug deleted"),
        (status = 404, description = "Bug not found"),
    ),
    tag = "bugs",
)]
#[delete("/bugs/{id}")]
pub async fn delete_bug(
    service: web::Data<BugService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Bug deleted successfully")))
}
