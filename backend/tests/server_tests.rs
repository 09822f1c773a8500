//! Front-door behaviour: routing, JSON errors and the `/run` and `/list` bodies.

use actix_web::{test, web, App};
use ghl_importer::config::Config;
use ghl_importer::server::configure_app;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn templates() -> TempDir {
    let dir = TempDir::new().unwrap();
    let template = json!({
        "type": "account",
        "role": "user",
        "roles": {"locationIds": ["LOC1"]}
    })
    .to_string();
    fs::write(dir.path().join("vendedor.json"), &template).unwrap();
    fs::write(dir.path().join("administrador.json"), &template).unwrap();
    dir
}

#[actix_web::test]
async fn index_is_served() {
    let app = test::init_service(
        App::new().configure(configure_app(web::Data::new(Config::default()))),
    )
    .await;

    for uri in ["/", "/index.html"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert!(resp.status().is_success(), "{uri}");
        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}

#[actix_web::test]
async fn unknown_paths_are_404() {
    let app = test::init_service(
        App::new().configure(configure_app(web::Data::new(Config::default()))),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/run").to_request()).await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/other").set_payload("{}").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn malformed_json_is_400_with_error_body() {
    let app = test::init_service(
        App::new().configure(configure_app(web::Data::new(Config::default()))),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/run")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid JSON");
}

#[actix_web::test]
async fn empty_csv_is_400() {
    let app = test::init_service(
        App::new().configure(configure_app(web::Data::new(Config::default()))),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({"csv": "   ", "dryRun": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CSV is empty.");
}

#[actix_web::test]
async fn run_returns_summary_and_rows() {
    let dir = templates();
    let config = Config {
        template_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let app = test::init_service(App::new().configure(configure_app(web::Data::new(config)))).await;

    let req = test::TestRequest::post()
        .uri("/run")
        .set_json(json!({
            "csv": "Nome,Email,Telefone,Cargo\nJoão Silva,a@x.com,111,Vendedor\nX,b@x.com,222,Gerente\n",
            "dryRun": true,
            "locationId": "LOC9"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["summary"], json!({"success": 1, "failed": 1}));
    assert_eq!(body["results"][0]["row"], 2);
    assert_eq!(body["results"][0]["status"], "dry-run");
    let sent: Value = serde_json::from_str(body["results"][0]["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent["locationIds"], json!(["LOC9"]));
    assert_eq!(body["results"][1]["status"], "error");
    assert!(body["results"][1].get("body").is_none());
}

#[actix_web::test]
async fn list_without_location_is_400() {
    let config = Config {
        token: Some("pit-test".into()),
        ..Config::default()
    };
    let app = test::init_service(App::new().configure(configure_app(web::Data::new(config)))).await;

    let req = test::TestRequest::post()
        .uri("/list")
        .set_json(json!({"saveFiles": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("location"));
}

#[actix_web::test]
async fn list_exports_and_summarizes_users() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .and(query_param("locationId", "LOC1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "users": [
                {"id": "1", "name": "Ana", "roles": {"role": "admin", "type": "account", "locationIds": ["LOC1"]}},
                {"id": "2", "name": "Bia", "deleted": true}
            ]
        })))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let json_path = out.path().join("users.json");
    let csv_path = out.path().join("users.csv");
    let config = Config {
        base_url: server.uri(),
        token: Some("pit-test".into()),
        ..Config::default()
    };
    let app = test::init_service(App::new().configure(configure_app(web::Data::new(config)))).await;

    let req = test::TestRequest::post()
        .uri("/list")
        .set_json(json!({
            "companyId": "LOC1",
            "usersJson": json_path.to_str().unwrap(),
            "usersCsv": csv_path.to_str().unwrap()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["summary"], json!({"count": 2, "total": 2}));
    assert_eq!(body["files"]["json"], json_path.to_str().unwrap());
    assert_eq!(body["users"][0]["role"], "admin");
    assert_eq!(body["users"][0]["locationIds"], json!(["LOC1"]));
    assert_eq!(body["users"][1]["deleted"], true);
    assert_eq!(body["users"][1]["locationIds"], json!([]));

    let snapshot: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(snapshot["companyId"], "LOC1");
    assert_eq!(snapshot["users"].as_array().unwrap().len(), 2);

    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text.lines().count(), 3);
}
