//! Batch user creation.
//!
//! - `runner`: the sequential import pipeline shared by the CLI and the server.
//! - `run`: the `POST /run` handler.

mod run;
pub mod runner;

use crate::server::not_found;
use actix_web::web::{post, resource, to};
use actix_web::Resource;

const API_PATH: &str = "/run";

/// Registers `POST /run`. Other methods on the path answer 404.
pub fn configure_routes() -> Resource {
    resource(API_PATH)
        .route(post().to(run::process))
        .default_service(to(not_found))
}
