pub mod ownership;
pub mod rules;
