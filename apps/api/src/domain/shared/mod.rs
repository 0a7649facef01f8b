pub mod errors;
pub mod store;
pub mod validation;
