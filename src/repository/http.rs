use crate::config::get_config;
use crate::dto::result_dto::{
    ApiErrorBody, FeedbackRequest, StudentResultRow, SubmitReceipt, SubmitTestRequest,
    TestResultRow,
};
use crate::dto::test_dto::{CreateTestRequest, CreateTestResponse};
use crate::error::{Error, Result};
use crate::models::class_group::ClassGroup;
use crate::models::question::Question;
use crate::models::test::Test;
use crate::repository::{ClassDirectory, ResultRepository, TestRepository};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for the test server API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config() -> Self {
        let config = get_config();
        Self::new(&config.api_base_url, config.request_timeout_secs)
    }
}

/// Maps a non-success response to an error, preferring the server's own
/// `{"error": "..."}` message when the body carries one.
async fn api_error(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => format!("Request failed with status {}", status),
    };
    tracing::warn!("API request failed with status {}: {}", status, message);

    if status == StatusCode::NOT_FOUND {
        Error::NotFound(message)
    } else {
        Error::Request(message)
    }
}

#[async_trait]
impl ClassDirectory for ApiClient {
    async fn list(&self) -> Result<Vec<ClassGroup>> {
        let response = self
            .client
            .get(format!("{}/api/classes", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Vec<ClassGroup>>().await?)
    }
}

#[async_trait]
impl TestRepository for ApiClient {
    async fn create(&self, request: &CreateTestRequest) -> Result<Test> {
        let response = self
            .client
            .post(format!("{}/api/tests", self.base_url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let created = response.json::<CreateTestResponse>().await?;
        tracing::info!(
            "Created test {} with {} questions",
            created.test_id,
            request.questions.len()
        );

        // The create endpoint returns only the new id; question ids stay 0
        // until the full test is fetched again.
        Ok(Test {
            id: created.test_id,
            subject: request.subject.clone(),
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            status: "ongoing".to_string(),
            class_id: Some(request.class_id),
            teacher_id: Some(request.teacher_id),
            questions: request
                .questions
                .iter()
                .map(|q| Question {
                    id: 0,
                    question: q.question.clone(),
                    choices: q.choices.clone(),
                    correct_answer: q.correct_answer,
                    score: q.score,
                })
                .collect(),
        })
    }

    async fn list_by_teacher(&self, teacher_id: i64) -> Result<Vec<Test>> {
        let response = self
            .client
            .get(format!("{}/api/tests/teacher/{}", self.base_url, teacher_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Vec<Test>>().await?)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Test>> {
        let response = self
            .client
            .get(format!("{}/api/tests/student/{}", self.base_url, student_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Vec<Test>>().await?)
    }

    async fn get(&self, test_id: i64) -> Result<Test> {
        let response = self
            .client
            .get(format!("{}/api/tests/{}", self.base_url, test_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Test>().await?)
    }
}

#[async_trait]
impl ResultRepository for ApiClient {
    async fn submit(
        &self,
        test_id: i64,
        student_id: i64,
        answers: &HashMap<i64, u32>,
    ) -> Result<SubmitReceipt> {
        let payload = SubmitTestRequest {
            student_id,
            answers: answers.clone(),
        };
        let response = self
            .client
            .post(format!("{}/api/tests/{}/submit", self.base_url, test_id))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let receipt = response.json::<SubmitReceipt>().await?;
        tracing::info!(
            "Submitted test {} for student {}: {}/{}",
            test_id,
            student_id,
            receipt.score,
            receipt.total_score
        );
        Ok(receipt)
    }

    async fn list_by_test(&self, test_id: i64) -> Result<Vec<TestResultRow>> {
        let response = self
            .client
            .get(format!("{}/api/results/test/{}", self.base_url, test_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Vec<TestResultRow>>().await?)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<StudentResultRow>> {
        let response = self
            .client
            .get(format!("{}/api/results/student/{}", self.base_url, student_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<Vec<StudentResultRow>>().await?)
    }

    async fn save_feedback(&self, result_id: i64, feedback: &str) -> Result<()> {
        let payload = FeedbackRequest {
            feedback: feedback.to_string(),
        };
        let response = self
            .client
            .post(format!(
                "{}/api/results/{}/feedback",
                self.base_url, result_id
            ))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        tracing::info!("Saved feedback for result {}", result_id);
        Ok(())
    }
}
