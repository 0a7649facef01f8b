pub mod blog;
pub mod policy;
pub mod shared;
pub mod social;
pub mod user;
