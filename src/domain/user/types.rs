use secrecy::Secret;
use serde::Deserialize;

use crate::domain::NewUser;

/// Form-encoded body of `POST /Users`.
#[derive(Deserialize)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

// Field-for-field: the form names are the entity names and nothing is derived
impl From<SignUpForm> for NewUser {
    fn from(form: SignUpForm) -> Self {
        NewUser::new(form.username, form.email, form.password)
    }
}
