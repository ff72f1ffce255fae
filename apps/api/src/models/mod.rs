pub mod documents;
pub mod profile;
