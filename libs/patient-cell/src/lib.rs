pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validation;

pub use router::{patient_routes, user_routes};
