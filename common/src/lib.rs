//! Wire models shared by the importer backend and its browser front end.

pub mod model;
pub mod requests;
pub mod responses;
