use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use unifinder::core::resolver::NO_RESULTS_MESSAGE;
use unifinder::{ApiClient, App, LocalStorage};

fn catalog() -> serde_json::Value {
    json!([
        {"university_id": "U001", "name": "University of Colombo", "location": "Colombo",
         "ranking": 1, "website": "https://cmb.ac.lk"},
        {"university_id": "U002", "name": "University of Moratuwa", "location": "Moratuwa",
         "ranking": 2, "website": "https://uom.lk"},
        {"university_id": "U003", "name": "University of Peradeniya", "location": "Kandy",
         "ranking": 3, "website": "https://pdn.ac.lk"}
    ])
}

fn app(server: &MockServer, dir: &TempDir) -> App<ApiClient, LocalStorage> {
    let api = ApiClient::new(&server.base_url()).unwrap();
    let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());
    App::new(api, storage)
}

fn ids(rendered: &unifinder::Rendered) -> Vec<String> {
    rendered.json["universities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["university_id"].as_str().unwrap().to_string())
        .collect()
}

const PROFILE: &str = r#"
district = "Colombo"
al_passed = true
ol_passed = true
stream = "Maths"
career_interest = "Engineering"
budget = 500000
preferred_city = "Colombo"
degree_programs = "Engineering"
program_description = "Civil"
hostel_required = false
sports_or_extracurricular = true
university_type = "State"
language_mediums = "English"
hostel_available = true
semester_fee_lkr = 0
entry_requirements = "3 passes"
ranking_score = 8.5
international_affiliation = false
"#;

#[tokio::test]
async fn test_explore_shows_whole_catalog() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir).explore().await.unwrap();
    assert!(rendered.ok);
    assert_eq!(rendered.json["label"], "Explore All Universities");
    assert_eq!(ids(&rendered), vec!["U001", "U002", "U003"]);
    assert!(rendered.text.contains("[U003] University of Peradeniya"));
}

#[tokio::test]
async fn test_recommendation_highlights_single_university() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/predict");
        then.status(200)
            .json_body(json!({"recommended_university_id": "U002"}));
    });
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("profile.toml");
    std::fs::write(&profile, PROFILE).unwrap();

    let rendered = app(&server, &dir).recommend_from_file(&profile).await.unwrap();
    assert!(rendered.ok);
    assert_eq!(rendered.json["display"]["mode"], "recommended");
    assert_eq!(ids(&rendered), vec!["U002"]);
    assert!(rendered.text.contains("★ [U002]"));
}

#[tokio::test]
async fn test_recommendation_outside_catalog_shows_empty_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/predict");
        then.status(200)
            .json_body(json!({"recommended_university_id": "U999"}));
    });
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("profile.toml");
    std::fs::write(&profile, PROFILE).unwrap();

    let rendered = app(&server, &dir).recommend_from_file(&profile).await.unwrap();
    assert!(ids(&rendered).is_empty());
    assert!(rendered.text.contains(NO_RESULTS_MESSAGE));
}

#[tokio::test]
async fn test_failed_recommendation_falls_back_to_catalog_with_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/predict");
        then.status(500).json_body(json!({"error": "model not loaded"}));
    });
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("profile.toml");
    std::fs::write(&profile, PROFILE).unwrap();

    let rendered = app(&server, &dir).recommend_from_file(&profile).await.unwrap();
    assert!(!rendered.ok);
    assert_eq!(rendered.json["notice"]["kind"], "error");
    assert_eq!(rendered.json["label"], "Explore All Universities");
    assert_eq!(ids(&rendered).len(), 3);
}

#[tokio::test]
async fn test_invalid_profile_file_never_reaches_the_server() {
    let server = MockServer::start();
    let predict = server.mock(|when, then| {
        when.method(POST).path("/api/predict");
        then.status(200)
            .json_body(json!({"recommended_university_id": "U002"}));
    });
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("profile.toml");
    std::fs::write(&profile, PROFILE.replace("500000", "\"lots\"")).unwrap();

    let err = app(&server, &dir)
        .recommend_from_file(&profile)
        .await
        .unwrap_err();
    assert!(matches!(err, unifinder::ClientError::InvalidConfigValue { .. }));
    predict.assert_hits(0);
}

#[tokio::test]
async fn test_search_results_replace_catalog() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/universities/search")
            .query_param("q", "kandy");
        then.status(200).json_body(json!([
            {"university_id": "U003", "name": "University of Peradeniya", "location": "Kandy",
             "ranking": 3, "website": "https://pdn.ac.lk"}
        ]));
    });
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir).search("kandy").await.unwrap();
    assert_eq!(rendered.json["label"], "Search Results");
    assert_eq!(ids(&rendered), vec!["U003"]);
}

#[tokio::test]
async fn test_empty_search_result_is_authoritative() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/universities/search");
        then.status(200).json_body(json!([]));
    });
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir).search("atlantis").await.unwrap();
    assert!(rendered.ok);
    assert_eq!(rendered.json["label"], "Search Results");
    assert!(ids(&rendered).is_empty());
    assert!(rendered.text.contains(NO_RESULTS_MESSAGE));
}

#[tokio::test]
async fn test_blank_search_shows_catalog_without_request() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(200).json_body(catalog());
    });
    let search = server.mock(|when, then| {
        when.method(GET).path("/api/universities/search");
        then.status(200).json_body(json!([]));
    });
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir).search("  ").await.unwrap();
    assert_eq!(rendered.json["label"], "Explore All Universities");
    assert_eq!(ids(&rendered).len(), 3);
    search.assert_hits(0);
}

#[tokio::test]
async fn test_catalog_failure_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/universities");
        then.status(503).body("");
    });
    let dir = TempDir::new().unwrap();

    let rendered = app(&server, &dir).explore().await.unwrap();
    assert!(!rendered.ok);
    assert!(rendered.text.contains("Failed to fetch university data."));
    assert!(ids(&rendered).is_empty());
}
