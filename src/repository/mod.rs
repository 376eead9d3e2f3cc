use crate::dto::result_dto::{StudentResultRow, SubmitReceipt, TestResultRow};
use crate::dto::test_dto::CreateTestRequest;
use crate::error::Result;
use crate::models::class_group::ClassGroup;
use crate::models::test::Test;
use async_trait::async_trait;
use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

pub mod http;
pub mod memory;

// ---------------------------------------------------------------------------
// Class directory
// ---------------------------------------------------------------------------

/// Read-only access to the class groups tests can be scheduled for.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClassDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<ClassGroup>>;
}

// ---------------------------------------------------------------------------
// Test repository
// ---------------------------------------------------------------------------

/// Persistence collaborator for tests. Lists are ordered by schedule time,
/// newest first, and omit questions; `get` returns the full question set.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TestRepository: Send + Sync {
    async fn create(&self, request: &CreateTestRequest) -> Result<Test>;

    async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<Test>>;

    /// Tests scheduled for the student's class.
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Test>>;

    async fn get(&self, test_id: i64) -> Result<Test>;
}

// ---------------------------------------------------------------------------
// Result repository
// ---------------------------------------------------------------------------

/// Persistence collaborator for submissions and feedback. At most one
/// result exists per (test, student) pair; a second submit for the same
/// pair fails with `Error::DuplicateSubmission`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Scores the answer mapping and stores the result.
    async fn submit(
        &self,
        test_id: i64,
        student_id: i64,
        answers: &HashMap<i64, u32>,
    ) -> Result<SubmitReceipt>;

    async fn list_by_test(&self, test_id: i64) -> Result<Vec<TestResultRow>>;

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<StudentResultRow>>;

    /// Attaches feedback text and marks the result as sent. Only these two
    /// fields ever change after submission.
    async fn save_feedback(&self, result_id: i64, feedback: &str) -> Result<()>;
}
