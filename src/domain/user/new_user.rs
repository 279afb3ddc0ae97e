use secrecy::Secret;
use uuid::Uuid;

/// A user as submitted through the sign up form, about to be persisted.
///
/// Fields are taken verbatim from the form: nothing is trimmed or normalised, and the
/// password is kept as plain text (it is only wrapped in `Secret` so it stays out of logs).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

impl NewUser {
    pub fn new(username: String, email: String, password: Secret<String>) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// A user read back from a `UserStore`, carrying the id the store assigned on insert.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

impl StoredUser {
    pub fn from_new_user(id: Uuid, user: &NewUser) -> Self {
        Self {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        }
    }
}
