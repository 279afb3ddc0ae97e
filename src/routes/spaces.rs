use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::utils::e500;
use crate::views::ViewRenderer;

#[tracing::instrument(name = "Listing spaces", skip_all)]
pub async fn list_spaces(
    views: web::Data<dyn ViewRenderer>,
) -> Result<HttpResponse, actix_web::Error> {
    let body = views.spaces().map_err(e500)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
