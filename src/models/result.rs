use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One student's scored submission for one test. At most one exists per
/// (test, student) pair; everything except `feedback`/`sent` is write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,
    #[serde(rename = "testId")]
    pub test_id: i64,
    #[serde(rename = "studentId")]
    pub student_id: i64,
    #[serde(default)]
    pub answers: HashMap<i64, u32>,
    pub score: i32,
    #[serde(rename = "totalScore")]
    pub total_score: i32,
    #[serde(rename = "submittedAt")]
    pub submitted_at: NaiveDateTime,
    pub feedback: Option<String>,
    pub sent: bool,
}
