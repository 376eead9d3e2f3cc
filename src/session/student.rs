use crate::dto::result_dto::{StudentResultRow, SubmitReceipt};
use crate::error::{Error, Result};
use crate::models::identity::Identity;
use crate::models::test::Test;
use crate::repository::{ResultRepository, TestRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The test currently open on screen, with the answers picked so far.
pub struct ActiveTest {
    pub test: Test,
    pub answers: HashMap<i64, u32>,
}

impl ActiveTest {
    /// True while some questions are still unanswered.
    pub fn requires_confirmation(&self) -> bool {
        self.answers.len() < self.test.questions.len()
    }
}

/// What came of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(SubmitReceipt),
    /// Some questions are unanswered; nothing was sent. The caller asks
    /// the student and retries with `confirmed = true`.
    ConfirmationRequired,
}

/// State behind the student's screen: the tests offered to their class,
/// their past results, and the test being taken right now.
pub struct StudentSession {
    pub student: Identity,
    tests_repo: Arc<dyn TestRepository>,
    results_repo: Arc<dyn ResultRepository>,
    pub tests: Vec<Test>,
    pub results: Vec<StudentResultRow>,
    pub active: Option<ActiveTest>,
    submitted_test_ids: HashSet<i64>,
}

impl StudentSession {
    pub fn new(
        student: Identity,
        tests_repo: Arc<dyn TestRepository>,
        results_repo: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            student,
            tests_repo,
            results_repo,
            tests: Vec::new(),
            results: Vec::new(),
            active: None,
            submitted_test_ids: HashSet::new(),
        }
    }

    /// Reloads the test list and the result history in one go.
    pub async fn refresh(&mut self) -> Result<()> {
        let (tests, results) = tokio::try_join!(
            self.tests_repo.list_by_student(self.student.id),
            self.results_repo.list_by_student(self.student.id),
        )?;
        self.tests = tests;
        self.results = results;
        Ok(())
    }

    /// Tests the student can still take. Completed tests stay in `tests`
    /// for the records but are never offered here.
    pub fn ongoing_tests(&self) -> Vec<&Test> {
        self.tests.iter().filter(|t| !t.is_completed()).collect()
    }

    /// Opens a test for taking, with a clean answer sheet.
    pub async fn start_test(&mut self, test_id: i64) -> Result<()> {
        let test = self.tests_repo.get(test_id).await?;
        self.active = Some(ActiveTest {
            test,
            answers: HashMap::new(),
        });
        Ok(())
    }

    /// Records a choice for a question. Picking again overwrites the
    /// earlier choice.
    pub fn select_answer(&mut self, question_id: i64, choice_index: u32) -> Result<()> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| Error::Validation("No test is in progress".to_string()))?;
        active.answers.insert(question_id, choice_index);
        Ok(())
    }

    /// Submits the open test. With unanswered questions and
    /// `confirmed = false` this returns `ConfirmationRequired` and sends
    /// nothing; the answer sheet stays open and untouched. Once the
    /// repository accepts the submission the receipt is always returned;
    /// the follow-up result-list refresh is best-effort.
    pub async fn submit(&mut self, confirmed: bool) -> Result<SubmitOutcome> {
        let active = self
            .active
            .as_ref()
            .ok_or_else(|| Error::Validation("No test is in progress".to_string()))?;

        if active.requires_confirmation() && !confirmed {
            return Ok(SubmitOutcome::ConfirmationRequired);
        }
        if self.submitted_test_ids.contains(&active.test.id) {
            return Err(Error::DuplicateSubmission);
        }

        let receipt = self
            .results_repo
            .submit(active.test.id, self.student.id, &active.answers)
            .await?;
        tracing::info!(
            "Student {} submitted test {}: {}/{}",
            self.student.id,
            active.test.id,
            receipt.score,
            receipt.total_score
        );

        self.submitted_test_ids.insert(active.test.id);
        self.active = None;

        // The submission is durable at this point; a refresh failure only
        // leaves the local result list stale.
        match self.results_repo.list_by_student(self.student.id).await {
            Ok(results) => self.results = results,
            Err(e) => tracing::warn!("Result refresh after submit failed: {}", e),
        }
        Ok(SubmitOutcome::Submitted(receipt))
    }

    /// Abandons the open test without submitting anything.
    pub fn close_test(&mut self) {
        self.active = None;
    }
}
