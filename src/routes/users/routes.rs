use crate::routes;
use actix_web::web;

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(routes::SIGN_UP_FORM_ROUTE, web::get().to(routes::sign_up_form))
        .route(routes::USERS_ROUTE, web::post().to(routes::sign_up));
}
