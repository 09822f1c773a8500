pub mod batch;
pub mod user;
