//! Client-side core for a mock test system: scheduling tests, taking
//! them, scoring, and the teacher's feedback round.

pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;
pub mod utils;

use crate::models::identity::Identity;
use crate::repository::http::ApiClient;
use crate::repository::{ClassDirectory, ResultRepository, TestRepository};
use crate::session::authoring::AuthoringSession;
use crate::session::review::ReviewSession;
use crate::session::student::StudentSession;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub classes: Arc<dyn ClassDirectory>,
    pub tests: Arc<dyn TestRepository>,
    pub results: Arc<dyn ResultRepository>,
}

impl AppState {
    pub fn new(
        classes: Arc<dyn ClassDirectory>,
        tests: Arc<dyn TestRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            classes,
            tests,
            results,
        }
    }

    /// Points every handle at the HTTP API named in the config.
    pub fn from_config() -> Self {
        let client = Arc::new(ApiClient::from_config());
        Self {
            classes: client.clone(),
            tests: client.clone(),
            results: client,
        }
    }

    pub fn authoring_session(&self, teacher: Identity) -> AuthoringSession {
        AuthoringSession::new(teacher, self.classes.clone(), self.tests.clone())
    }

    pub fn student_session(&self, student: Identity) -> StudentSession {
        StudentSession::new(student, self.tests.clone(), self.results.clone())
    }

    pub fn review_session(&self, teacher: Identity) -> ReviewSession {
        ReviewSession::new(teacher, self.tests.clone(), self.results.clone())
    }
}
