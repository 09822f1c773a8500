pub mod batch;
pub mod data_sources;
pub mod export;
pub mod ghl;
pub mod templates;
