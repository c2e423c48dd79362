use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use unifinder::core::card::{LOGIN_TO_APPLY, LOGIN_TO_RATE};
use unifinder::core::forms::{SignupField, SignupForm};
use unifinder::domain::model::{ProfileUpdate, UniversityId};
use unifinder::{ApiClient, App, ClientError, LocalStorage};

fn app(server: &MockServer, dir: &TempDir) -> App<ApiClient, LocalStorage> {
    let api = ApiClient::new(&server.base_url()).unwrap();
    let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());
    App::new(api, storage)
}

fn mock_login(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(200).json_body(json!({
            "message": "Login successful",
            "user": {
                "username": "nimal",
                "user_type": "user",
                "full_name": "Nimal Perera",
                "email": "nimal@example.com",
                "age": 19,
                "city": "Galle"
            }
        }));
    });
}

#[test]
fn test_whoami_without_session() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let rendered = tokio_test::block_on(app(&server, &dir).whoami()).unwrap();
    assert_eq!(rendered.text, "Not logged in.");
    assert!(rendered.json["user"].is_null());
}

#[tokio::test]
async fn test_session_survives_between_app_instances() {
    let server = MockServer::start();
    mock_login(&server);
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir).login("nimal", "pw").await.unwrap();
    assert_eq!(rendered.text, "Logged in as nimal");
    assert!(dir.path().join("session.json").exists());

    let rendered = app(&server, &dir).whoami().await.unwrap();
    assert_eq!(rendered.json["user"]["email"], "nimal@example.com");

    app(&server, &dir).logout().await.unwrap();
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_state() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(401)
            .json_body(json!({"error": "Invalid username or password"}));
    });
    let dir = TempDir::new().unwrap();

    let err = app(&server, &dir).login("nimal", "bad").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_signup_validates_before_sending() {
    let server = MockServer::start();
    let signup = server.mock(|when, then| {
        when.method(POST)
            .path("/signup")
            .json_body_partial(r#"{"username": "kamal", "user_type": "user", "age": 21}"#);
        then.status(201)
            .json_body(json!({"message": "User created successfully"}));
    });
    let dir = TempDir::new().unwrap();
    let app = app(&server, &dir);

    let form = SignupForm::new()
        .with(SignupField::Username, "kamal")
        .with(SignupField::Password, "secret")
        .with(SignupField::FullName, "Kamal Silva")
        .with(SignupField::Email, "not-an-email")
        .with(SignupField::Age, "21");
    assert!(app.signup(&form).await.is_err());
    signup.assert_hits(0);

    let form = form.with(SignupField::Email, "kamal@example.com");
    let rendered = app.signup(&form).await.unwrap();
    assert_eq!(rendered.text, "Sign-up successful! You can now log in.");
    signup.assert_hits(1);
}

#[tokio::test]
async fn test_rate_and_apply_require_login() {
    let server = MockServer::start();
    let rating = server.mock(|when, then| {
        when.method(POST).path("/api/feedback/submit-rating");
        then.status(201).json_body(json!({"message": "ok"}));
    });
    let dir = TempDir::new().unwrap();
    let app = app(&server, &dir);

    let rendered = app.rate(&UniversityId::from("U002"), 4).await.unwrap();
    assert!(!rendered.ok);
    assert!(rendered.text.contains(LOGIN_TO_RATE));

    let rendered = app.apply(&UniversityId::from("U002")).await.unwrap();
    assert!(rendered.text.contains(LOGIN_TO_APPLY));
    rating.assert_hits(0);
}

#[tokio::test]
async fn test_rating_uses_session_email_and_refreshes_summary() {
    let server = MockServer::start();
    mock_login(&server);
    let rating = server.mock(|when, then| {
        when.method(POST)
            .path("/api/feedback/submit-rating")
            .json_body(json!({"user_email": "nimal@example.com", "university_id": "U002", "rating": 5}));
        then.status(201).json_body(json!({"message": "Rating submitted successfully"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/feedback/average-rating/U002");
        then.status(200)
            .json_body(json!({"average_rating": 4.5, "count": 2}));
    });
    let dir = TempDir::new().unwrap();
    let app = app(&server, &dir);
    app.login("nimal", "pw").await.unwrap();

    let rendered = app.rate(&UniversityId::from("U002"), 5).await.unwrap();
    rating.assert();
    assert!(rendered.ok);
    assert_eq!(rendered.json["user_rating"], 5);
    assert_eq!(rendered.json["summary"]["count"], 2);
    assert!(rendered.text.contains("4.5 (2 ratings)"));
}

#[tokio::test]
async fn test_apply_posts_booking() {
    let server = MockServer::start();
    mock_login(&server);
    let booking = server.mock(|when, then| {
        when.method(POST)
            .path("/api/bookings")
            .json_body(json!({"user_email": "nimal@example.com", "university_id": "U003"}));
        then.status(201)
            .json_body(json!({"message": "Booking created successfully"}));
    });
    let dir = TempDir::new().unwrap();
    let app = app(&server, &dir);
    app.login("nimal", "pw").await.unwrap();

    let rendered = app.apply(&UniversityId::from("U003")).await.unwrap();
    booking.assert();
    assert!(rendered.text.contains("Application submitted successfully!"));
}

#[tokio::test]
async fn test_ratings_fall_back_to_zero_when_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/feedback/average-rating/U009");
        then.status(500).body("");
    });
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir)
        .ratings(&UniversityId::from("U009"))
        .await
        .unwrap();
    assert!(rendered.ok);
    assert!(rendered.text.contains("0.0 (0 ratings)"));
}

#[tokio::test]
async fn test_profile_update_refreshes_stored_session() {
    let server = MockServer::start();
    mock_login(&server);
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/user/update")
            .json_body(json!({"username": "nimal", "city": "Kandy"}));
        then.status(200)
            .json_body(json!({"message": "Profile updated successfully"}));
    });
    let dir = TempDir::new().unwrap();
    let app = app(&server, &dir);

    let change = ProfileUpdate {
        city: Some("Kandy".into()),
        ..Default::default()
    };
    let err = app.update_profile(change.clone()).await.unwrap_err();
    assert!(matches!(err, ClientError::SessionRequired { .. }));

    app.login("nimal", "pw").await.unwrap();
    assert!(app.update_profile(ProfileUpdate::default()).await.is_err());

    app.update_profile(change).await.unwrap();
    update.assert();

    let rendered = app.whoami().await.unwrap();
    assert_eq!(rendered.json["user"]["city"], "Kandy");
    assert_eq!(rendered.json["user"]["full_name"], "Nimal Perera");
}

#[tokio::test]
async fn test_delete_account_needs_confirmation_and_logs_out() {
    let server = MockServer::start();
    mock_login(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/user/delete")
            .query_param("username", "nimal");
        then.status(200)
            .json_body(json!({"message": "Profile deleted successfully"}));
    });
    let dir = TempDir::new().unwrap();
    let app = app(&server, &dir);
    app.login("nimal", "pw").await.unwrap();

    assert!(app.delete_account(false).await.is_err());
    delete.assert_hits(0);

    app.delete_account(true).await.unwrap();
    delete.assert();
    assert!(app.sessions().current().await.unwrap().is_none());
}
