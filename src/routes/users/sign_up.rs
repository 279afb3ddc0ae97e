use std::fmt::{self, Debug, Formatter};

use actix_web::http::StatusCode;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{HttpResponse, ResponseError, web};
use tracing::{Span, field};

use crate::domain::{NewUser, SignUpForm};
use crate::repository::UserStore;
use crate::routes::SPACES_ROUTE;
use crate::utils;
use crate::views::{RenderError, ViewRenderer};

#[derive(thiserror::Error)]
pub enum SignUpError {
    #[error("Failed to render the sign up form")]
    RenderFailure(#[source] RenderError),

    #[error("Failed to store the new user")]
    PersistenceFailure(#[source] anyhow::Error),
}

impl Debug for SignUpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for SignUpError {
    fn status_code(&self) -> StatusCode {
        match self {
            SignUpError::RenderFailure(_) | SignUpError::PersistenceFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        utils::build_error_response(self.status_code(), self.to_string())
    }
}

/// Where the browser goes next. Rendered as `303 See Other` so the follow-up is a GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    location: &'static str,
}

impl Redirect {
    pub fn to(location: &'static str) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &'static str {
        self.location
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((LOCATION, self.location))
            .finish()
    }
}

#[tracing::instrument(name = "Rendering the sign up form", skip_all)]
pub async fn sign_up_form(
    views: web::Data<dyn ViewRenderer>,
) -> Result<HttpResponse, SignUpError> {
    let body = views.sign_up_form().map_err(SignUpError::RenderFailure)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

#[tracing::instrument(
    name = "Signing up a new user",
    skip_all,
    fields(
        username = tracing::field::Empty,
        user_email = tracing::field::Empty
    )
)]
pub async fn sign_up(
    form: web::Form<SignUpForm>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, SignUpError> {
    let form = form.into_inner();
    Span::current().record("username", field::display(&form.username));
    Span::current().record("user_email", field::display(&form.email));

    let redirect = submit_sign_up(store.get_ref(), form).await?;
    Ok(redirect.into_response())
}

/// Stores the submitted user in a single unit of work and points the browser at the
/// Spaces listing. The same form submitted twice is stored twice.
pub async fn submit_sign_up(
    store: &dyn UserStore,
    form: SignUpForm,
) -> Result<Redirect, SignUpError> {
    let user = NewUser::from(form);

    store_user(store, &user)
        .await
        .map_err(SignUpError::PersistenceFailure)?;
    tracing::info!("A new user has been stored");

    Ok(Redirect::to(SPACES_ROUTE))
}

#[tracing::instrument(skip_all)]
async fn store_user(store: &dyn UserStore, user: &NewUser) -> Result<(), anyhow::Error> {
    let mut unit_of_work = store.begin().await?;
    unit_of_work.add(user).await?;
    unit_of_work.commit().await
}
