use crate::dto::result_dto::TestResultRow;
use crate::error::{Error, Result};
use crate::models::identity::Identity;
use crate::models::test::Test;
use crate::repository::{ResultRepository, TestRepository};
use std::sync::Arc;

/// Feedback being drafted for one result row.
pub struct FeedbackEditor {
    pub result_id: i64,
    pub draft: String,
}

/// State behind the teacher's results screen: their tests, the result
/// rows of the selected test, and the feedback editor if one is open.
pub struct ReviewSession {
    pub teacher: Identity,
    tests_repo: Arc<dyn TestRepository>,
    results_repo: Arc<dyn ResultRepository>,
    pub tests: Vec<Test>,
    pub selected_test: Option<i64>,
    pub results: Vec<TestResultRow>,
    pub editor: Option<FeedbackEditor>,
}

impl ReviewSession {
    pub fn new(
        teacher: Identity,
        tests_repo: Arc<dyn TestRepository>,
        results_repo: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            teacher,
            tests_repo,
            results_repo,
            tests: Vec::new(),
            selected_test: None,
            results: Vec::new(),
            editor: None,
        }
    }

    /// Fills the test selector with the teacher's own tests.
    pub async fn load_tests(&mut self) -> Result<()> {
        self.tests = self.tests_repo.list_by_teacher(self.teacher.id).await?;
        Ok(())
    }

    /// Switches the results table to another test; selecting nothing
    /// clears it. Any open feedback editor is dropped either way.
    pub async fn select_test(&mut self, test_id: Option<i64>) -> Result<()> {
        self.editor = None;
        self.selected_test = test_id;
        self.results = match test_id {
            Some(id) => self.results_repo.list_by_test(id).await?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// Opens the feedback editor for a row, prefilled with whatever
    /// feedback the result already carries. Opening another row replaces
    /// the editor.
    pub fn open_feedback(&mut self, result_id: i64) -> Result<()> {
        let row = self
            .results
            .iter()
            .find(|r| r.id == result_id)
            .ok_or_else(|| Error::NotFound("Result not found".to_string()))?;
        self.editor = Some(FeedbackEditor {
            result_id,
            draft: row.feedback.clone().unwrap_or_default(),
        });
        Ok(())
    }

    /// Replaces the draft text, if an editor is open.
    pub fn set_draft(&mut self, text: &str) {
        if let Some(editor) = self.editor.as_mut() {
            editor.draft = text.to_string();
        }
    }

    /// Saves the draft to the result and marks it sent. An empty draft
    /// is rejected before anything is sent; the editor stays open.
    pub async fn save_feedback(&mut self) -> Result<()> {
        let editor = self
            .editor
            .as_ref()
            .ok_or_else(|| Error::Validation("No feedback editor is open".to_string()))?;
        let draft = editor.draft.trim();
        if draft.is_empty() {
            return Err(Error::Validation("Feedback cannot be empty".to_string()));
        }

        self.results_repo
            .save_feedback(editor.result_id, draft)
            .await?;
        tracing::info!("Feedback saved for result {}", editor.result_id);

        // Patch the local row rather than refetching the whole table.
        if let Some(row) = self.results.iter_mut().find(|r| r.id == editor.result_id) {
            row.feedback = Some(draft.to_string());
            row.sent = true;
        }
        self.editor = None;
        Ok(())
    }

    /// Closes the editor without saving; the row keeps what it had.
    pub fn cancel_feedback(&mut self) {
        self.editor = None;
    }
}
