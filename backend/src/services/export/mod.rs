//! Export of existing users.
//!
//! - `list`: fetch + snapshot logic and the `POST /list` handler.
//! - `writer`: JSON and CSV snapshot writers.

pub mod list;
pub mod writer;

use crate::server::not_found;
use actix_web::web::{post, resource, to};
use actix_web::Resource;

const API_PATH: &str = "/list";

/// Registers `POST /list`. Other methods on the path answer 404.
pub fn configure_routes() -> Resource {
    resource(API_PATH)
        .route(post().to(list::process))
        .default_service(to(not_found))
}
