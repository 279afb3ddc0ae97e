use std::time::Duration;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use url::Url;

use crate::configuration::VerifierSettings;
use crate::routes::SIGN_UP_FORM_ROUTE;
use crate::verifier::{Page, Role, VerificationError};

/// Title of the page a successful sign up lands on.
pub const EXPECTED_TITLE_PATTERN: &str = "Spaces - MakersBnB";

#[derive(Debug, Clone)]
pub struct SignUpCredentials {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

impl Default for SignUpCredentials {
    fn default() -> Self {
        Self {
            username: "username".to_string(),
            email: "email@email.com".to_string(),
            password: Secret::new("secret".to_string()),
        }
    }
}

/// The page the verifier ended on.
#[derive(Debug)]
pub struct VerifiedPage {
    pub url: Option<Url>,
    pub title: String,
}

/// Signs up through the rendered form and checks where the browser ends up.
///
/// Every step must succeed: a missing control, a navigation that does not settle within
/// the step timeout, or an unexpected title fails the whole run.
#[derive(Debug)]
pub struct SignUpFlowVerifier {
    base_url: Url,
    step_timeout: Duration,
    credentials: SignUpCredentials,
    title_pattern: Regex,
}

impl SignUpFlowVerifier {
    pub fn new(base_url: &str, step_timeout: Duration) -> Result<Self, VerificationError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| VerificationError::InvalidUrl(base_url.to_string(), e))?;

        Ok(Self {
            base_url,
            step_timeout,
            credentials: SignUpCredentials::default(),
            title_pattern: compile_pattern(EXPECTED_TITLE_PATTERN)?,
        })
    }

    pub fn from_settings(settings: &VerifierSettings) -> Result<Self, VerificationError> {
        Self::new(&settings.base_url, settings.step_timeout())
    }

    pub fn with_credentials(mut self, credentials: SignUpCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_title_pattern(mut self, pattern: &str) -> Result<Self, VerificationError> {
        self.title_pattern = compile_pattern(pattern)?;
        Ok(self)
    }

    #[tracing::instrument(
        name = "Verifying the sign up flow",
        skip(self),
        fields(base_url = %self.base_url)
    )]
    pub async fn verify(&self) -> Result<VerifiedPage, VerificationError> {
        let mut page = Page::new(self.step_timeout)?;

        let form_url = self
            .base_url
            .join(SIGN_UP_FORM_ROUTE)
            .map_err(|e| VerificationError::InvalidUrl(SIGN_UP_FORM_ROUTE.to_string(), e))?;
        page.goto(form_url.as_str()).await?;

        let username = page.get_by_label("Username")?;
        page.fill(&username, &self.credentials.username)?;
        let email = page.get_by_label("Email")?;
        page.fill(&email, &self.credentials.email)?;
        let password = page.get_by_label("Password")?;
        page.fill(&password, self.credentials.password.expose_secret())?;

        let submit = page.get_by_role(Role::Button)?;
        page.click(&submit).await?;

        page.expect_title(&self.title_pattern)?;
        tracing::info!(title = %page.title(), "Sign up flow verified");

        Ok(VerifiedPage {
            url: page.url().cloned(),
            title: page.title().to_string(),
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, VerificationError> {
    Regex::new(pattern).map_err(|e| VerificationError::InvalidPattern(pattern.to_string(), e))
}
