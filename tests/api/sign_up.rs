use crate::helpers;
use fake::Fake;
use fake::faker::internet::en::{SafeEmail, Username};
use makersbnb::repository::UserStore;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use secrecy::ExposeSecret;
use serde_json::Value;

fn generated_fields() -> [(&'static str, String); 3] {
    [
        ("username", Username().fake()),
        ("email", SafeEmail().fake()),
        ("password", "secret".to_string()),
    ]
}

#[tokio::test]
async fn sign_up_form_is_served_as_html_with_three_labelled_fields() {
    let app = helpers::spawn_app().await;

    let response = app.get_sign_up_form().await;
    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers().get(CONTENT_TYPE).unwrap().clone();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let html = response.text().await.unwrap();
    for label in ["Username", "Email", "Password"] {
        assert!(html.contains(&format!(">{label}</label>")), "missing {label}");
    }
    assert!(html.contains("<button"));
}

#[tokio::test]
async fn sign_up_persists_the_user_and_redirects_to_spaces() {
    let app = helpers::spawn_app().await;
    let fields = generated_fields();

    let response = app.post_sign_up(&fields).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/Spaces");

    let users = app.store.users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, fields[0].1);
    assert_eq!(users[0].email, fields[1].1);
    assert_eq!(users[0].password.expose_secret(), &fields[2].1);
}

#[tokio::test]
async fn sign_up_keeps_fields_exactly_as_submitted() {
    let app = helpers::spawn_app().await;
    let fields = [
        ("username", "  Mixed Case User  "),
        ("email", "NOT-AN-EMAIL"),
        ("password", " p@ss word "),
    ];

    let response = app.post_sign_up(&fields).await;
    assert_eq!(response.status().as_u16(), 303);

    let users = app.store.users().await.unwrap();
    assert_eq!(users[0].username, "  Mixed Case User  ");
    assert_eq!(users[0].email, "NOT-AN-EMAIL");
    assert_eq!(users[0].password.expose_secret(), " p@ss word ");
}

#[tokio::test]
async fn signing_up_twice_with_the_same_fields_stores_two_users() {
    let app = helpers::spawn_app().await;
    let fields = generated_fields();

    app.post_sign_up(&fields).await.error_for_status().unwrap();
    app.post_sign_up(&fields).await.error_for_status().unwrap();

    let users = app.store.users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_ne!(users[0].id, users[1].id);
    assert_eq!(users[0].username, users[1].username);
}

#[tokio::test]
async fn sign_up_returns_400_when_fields_are_missing() {
    let app = helpers::spawn_app().await;

    let test_cases = vec![
        (
            vec![("email", "email@email.com"), ("password", "secret")],
            "missing the username",
        ),
        (
            vec![("username", "username"), ("password", "secret")],
            "missing the email",
        ),
        (
            vec![("username", "username"), ("email", "email@email.com")],
            "missing the password",
        ),
        (vec![], "missing username, email and password"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = app.post_sign_up(&invalid_body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the body was {error_message}."
        );
    }
    assert!(app.store.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn sign_up_returns_500_and_stores_nothing_when_the_commit_fails() {
    let app = helpers::spawn_app().await;
    app.store.set_commit_failure(true);

    let response = app.post_sign_up(&generated_fields()).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 500);
    assert_eq!(body["message"], "Failed to store the new user");

    app.store.set_commit_failure(false);
    assert!(app.store.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn there_is_no_user_index_page() {
    let app = helpers::spawn_app().await;

    let response = app.get_users().await;

    assert_eq!(response.status().as_u16(), 405);
}
