pub mod import_service;
pub mod scoring_service;
