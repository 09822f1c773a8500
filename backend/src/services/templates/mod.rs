//! # Role Templates
//!
//! Everything needed to turn a normalized CSV row into a user-creation body.
//!
//! ## Sub-modules:
//! - `role`: maps free-text roles (`Vendedor`, `Seller`, `Admin`, ...) to the two
//!   supported roles.
//! - `load`: reads the per-role JSON template from the template directory.
//! - `payload`: resolves location and company IDs and assembles the request body.

pub mod load;
pub mod payload;
pub mod role;
