//! Local HTTP front door for the browser UI.
//!
//! Serves the embedded page at `/` and `/index.html` and exposes the importer
//! through two JSON endpoints:
//! - `POST /run`: batch creation from CSV text (`services::batch`).
//! - `POST /list`: export of existing users (`services::export`).
//!
//! Everything else answers 404 with a JSON error body.

use crate::config::Config;
use crate::services;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use common::responses::ErrorResponse;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

pub const HOST: &str = "127.0.0.1";
const JSON_LIMIT: usize = 10 * 1024 * 1024;

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not Found"))
}

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    if req.method() != actix_web::http::Method::GET {
        return not_found().await;
    }
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => not_found().await,
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body too large"
        }
        _ => "Invalid JSON",
    };
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(message));
    InternalError::from_response(err, response).into()
}

/// Registers state and every route on an app; shared by `run_server` and tests.
pub fn configure_app(config: web::Data<Config>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT)
                .content_type_required(false)
                .error_handler(json_error),
        )
        .app_data(config)
        .service(services::batch::configure_routes())
        .service(services::export::configure_routes())
        .default_service(web::to(serve_embedded));
    }
}

pub async fn run_server(config: Config, port: u16, open_browser: bool) -> std::io::Result<()> {
    let url = format!("http://{}:{}", HOST, port);

    if open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Server running at {}", url);

    let config = web::Data::new(config);
    HttpServer::new(move || App::new().configure(configure_app(config.clone())))
        .workers(1)
        .bind((HOST, port))?
        .run()
        .await
}
