use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    #[serde(rename = "studentId")]
    pub student_id: i64,
    pub answers: HashMap<i64, u32>,
}

/// What the submit endpoint echoes back. The durable result row comes from
/// the list endpoints afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub score: i32,
    #[serde(rename = "totalScore")]
    pub total_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

/// One row of the teacher's per-test results table, joined with the
/// student's name and registration number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultRow {
    pub id: i64,
    #[serde(rename = "studentRegNum")]
    pub student_reg_num: String,
    #[serde(rename = "studentName")]
    pub student_name: String,
    pub score: i32,
    #[serde(rename = "totalScore")]
    pub total_score: i32,
    #[serde(rename = "submittedAt")]
    pub submitted_at: NaiveDateTime,
    pub feedback: Option<String>,
    pub sent: bool,
}

impl TestResultRow {
    /// Score as a percentage, rounded to one decimal for display.
    pub fn percentage(&self) -> f64 {
        if self.total_score > 0 {
            (self.score as f64 * 1000.0 / self.total_score as f64).round() / 10.0
        } else {
            0.0
        }
    }
}

/// One row of a student's own results list, joined with the test subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResultRow {
    pub id: i64,
    pub subject: String,
    pub score: i32,
    #[serde(rename = "totalScore")]
    pub total_score: i32,
    #[serde(rename = "submittedAt")]
    pub submitted_at: NaiveDateTime,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
