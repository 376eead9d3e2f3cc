//! In-memory backend for tests and offline development.

use crate::dto::result_dto::{StudentResultRow, SubmitReceipt, TestResultRow};
use crate::dto::test_dto::CreateTestRequest;
use crate::error::{Error, Result};
use crate::models::class_group::ClassGroup;
use crate::models::question::Question;
use crate::models::result::TestResult;
use crate::models::test::Test;
use crate::repository::{ClassDirectory, ResultRepository, TestRepository};
use crate::services::scoring_service::ScoringService;
use crate::utils::time;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A registered student, as the roster knows them.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub reg_num: String,
    pub class_id: i64,
}

#[derive(Default)]
struct Inner {
    classes: Vec<ClassGroup>,
    students: HashMap<i64, StudentRecord>,
    tests: HashMap<i64, Test>,
    results: HashMap<i64, TestResult>,
    next_test_id: i64,
    next_question_id: i64,
    next_result_id: i64,
}

/// A stand-in for the test server that keeps everything in memory while
/// honoring the same rules: one result per (test, student) pair, results
/// immutable after submission except for feedback, newest-first listings.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&self, class: ClassGroup) {
        self.inner.lock().unwrap().classes.push(class);
    }

    pub fn add_student(&self, student: StudentRecord) {
        let mut inner = self.inner.lock().unwrap();
        inner.students.insert(student.id, student);
    }
}

/// Listings mirror the server's summary rows: no question payload.
fn summary(test: &Test) -> Test {
    Test {
        questions: Vec::new(),
        ..test.clone()
    }
}

#[async_trait]
impl ClassDirectory for InMemoryBackend {
    async fn list(&self) -> Result<Vec<ClassGroup>> {
        Ok(self.inner.lock().unwrap().classes.clone())
    }
}

#[async_trait]
impl TestRepository for InMemoryBackend {
    async fn create(&self, request: &CreateTestRequest) -> Result<Test> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_test_id += 1;
        let test_id = inner.next_test_id;

        let questions = request
            .questions
            .iter()
            .map(|q| {
                inner.next_question_id += 1;
                Question {
                    id: inner.next_question_id,
                    question: q.question.clone(),
                    choices: q.choices.clone(),
                    correct_answer: q.correct_answer,
                    score: q.score,
                }
            })
            .collect();

        let test = Test {
            id: test_id,
            subject: request.subject.clone(),
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            status: "ongoing".to_string(),
            class_id: Some(request.class_id),
            teacher_id: Some(request.teacher_id),
            questions,
        };
        inner.tests.insert(test_id, test.clone());
        Ok(test)
    }

    async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<Test>> {
        let inner = self.inner.lock().unwrap();
        let mut tests: Vec<Test> = inner
            .tests
            .values()
            .filter(|t| t.teacher_id == Some(teacher_id))
            .map(summary)
            .collect();
        tests.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        Ok(tests)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Test>> {
        let inner = self.inner.lock().unwrap();
        let student = inner
            .students
            .get(&student_id)
            .ok_or_else(|| Error::NotFound("Student not found".to_string()))?;

        let mut tests: Vec<Test> = inner
            .tests
            .values()
            .filter(|t| t.class_id == Some(student.class_id))
            .map(summary)
            .collect();
        tests.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        Ok(tests)
    }

    async fn get(&self, test_id: i64) -> Result<Test> {
        let inner = self.inner.lock().unwrap();
        inner
            .tests
            .get(&test_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Test not found".to_string()))
    }
}

#[async_trait]
impl ResultRepository for InMemoryBackend {
    async fn submit(
        &self,
        test_id: i64,
        student_id: i64,
        answers: &HashMap<i64, u32>,
    ) -> Result<SubmitReceipt> {
        let mut inner = self.inner.lock().unwrap();
        let test = inner
            .tests
            .get(&test_id)
            .ok_or_else(|| Error::NotFound("Test not found".to_string()))?;

        if inner
            .results
            .values()
            .any(|r| r.test_id == test_id && r.student_id == student_id)
        {
            return Err(Error::DuplicateSubmission);
        }

        let (score, total_score) = ScoringService::score(&test.questions, answers);

        inner.next_result_id += 1;
        let result = TestResult {
            id: inner.next_result_id,
            test_id,
            student_id,
            answers: answers.clone(),
            score,
            total_score,
            submitted_at: time::now(),
            feedback: None,
            sent: false,
        };
        let receipt = SubmitReceipt {
            score: result.score,
            total_score: result.total_score,
        };
        inner.results.insert(result.id, result);
        Ok(receipt)
    }

    async fn list_by_test(&self, test_id: i64) -> Result<Vec<TestResultRow>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<TestResultRow> = inner
            .results
            .values()
            .filter(|r| r.test_id == test_id)
            .filter_map(|r| {
                let student = inner.students.get(&r.student_id)?;
                Some(TestResultRow {
                    id: r.id,
                    student_reg_num: student.reg_num.clone(),
                    student_name: student.name.clone(),
                    score: r.score,
                    total_score: r.total_score,
                    submitted_at: r.submitted_at,
                    feedback: r.feedback.clone(),
                    sent: r.sent,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(rows)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<StudentResultRow>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<StudentResultRow> = inner
            .results
            .values()
            .filter(|r| r.student_id == student_id)
            .map(|r| StudentResultRow {
                id: r.id,
                subject: inner
                    .tests
                    .get(&r.test_id)
                    .map(|t| t.subject.clone())
                    .unwrap_or_default(),
                score: r.score,
                total_score: r.total_score,
                submitted_at: r.submitted_at,
                feedback: r.feedback.clone(),
            })
            .collect();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(rows)
    }

    async fn save_feedback(&self, result_id: i64, feedback: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let result = inner
            .results
            .get_mut(&result_id)
            .ok_or_else(|| Error::NotFound("Result not found".to_string()))?;
        result.feedback = Some(feedback.to_string());
        result.sent = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::test_dto::NewQuestion;
    use chrono::NaiveDate;

    fn sample_request() -> CreateTestRequest {
        CreateTestRequest {
            subject: "Physics".to_string(),
            scheduled_at: NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            duration_minutes: 45,
            class_id: 1,
            teacher_id: 7,
            questions: vec![NewQuestion {
                question: "Unit of force?".to_string(),
                choices: vec![
                    "Newton".to_string(),
                    "Joule".to_string(),
                    "Watt".to_string(),
                    "Pascal".to_string(),
                ],
                correct_answer: 0,
                score: 5,
            }],
        }
    }

    #[tokio::test]
    async fn submitting_twice_is_rejected() {
        let backend = InMemoryBackend::new();
        backend.add_class(ClassGroup {
            id: 1,
            department: "CSE".to_string(),
            year: 2,
            section: "A".to_string(),
        });
        backend.add_student(StudentRecord {
            id: 11,
            name: "Asha".to_string(),
            reg_num: "CSE-2-001".to_string(),
            class_id: 1,
        });

        let test = backend.create(&sample_request()).await.unwrap();
        let answers = HashMap::from([(test.questions[0].id, 0u32)]);

        let receipt = backend.submit(test.id, 11, &answers).await.unwrap();
        assert_eq!(receipt.score, 5);
        assert_eq!(receipt.total_score, 5);

        let second = backend.submit(test.id, 11, &answers).await;
        assert!(matches!(second, Err(Error::DuplicateSubmission)));
    }

    #[tokio::test]
    async fn feedback_requires_an_existing_result() {
        let backend = InMemoryBackend::new();
        let outcome = backend.save_feedback(99, "Good work").await;
        assert!(matches!(outcome, Err(Error::NotFound(_))));
    }
}
