pub mod profile;
pub mod requests;
