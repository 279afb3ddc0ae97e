use crate::helpers::TestApp;
use makersbnb::verifier::SignUpFlowVerifier;
use reqwest::Response;
use std::time::Duration;

impl TestApp {
    pub async fn get_sign_up_form(&self) -> Response {
        self.api_client
            .get(format!("{}/Users/New", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_sign_up<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize + ?Sized,
    {
        self.api_client
            .post(format!("{}/Users", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_users(&self) -> Response {
        self.api_client
            .get(format!("{}/Users", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_spaces(&self) -> Response {
        self.api_client
            .get(format!("{}/Spaces", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> Response {
        self.api_client
            .get(format!("{}/health_check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn verifier(&self) -> SignUpFlowVerifier {
        SignUpFlowVerifier::new(&self.address, Duration::from_secs(5))
            .expect("Failed to build the sign up verifier.")
    }
}
