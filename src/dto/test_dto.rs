use crate::models::question::CHOICE_COUNT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A question as authored or uploaded, before the service assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewQuestion {
    #[validate(custom(function = "validate_question_text"))]
    pub question: String,
    #[validate(custom(function = "validate_choices"))]
    pub choices: Vec<String>,
    #[validate(range(max = 3, message = "Correct answer must index one of the four choices"))]
    #[serde(rename = "correctAnswer")]
    pub correct_answer: u32,
    #[validate(range(min = 1, message = "Score must be positive"))]
    pub score: i32,
}

impl Default for NewQuestion {
    fn default() -> Self {
        Self {
            question: String::new(),
            choices: vec![String::new(); CHOICE_COUNT],
            correct_answer: 0,
            score: 5,
        }
    }
}

fn validate_question_text(question: &str) -> Result<(), ValidationError> {
    if question.trim().is_empty() {
        let mut err = ValidationError::new("question");
        err.message = Some("Question text is required".into());
        return Err(err);
    }
    Ok(())
}

fn validate_choices(choices: &[String]) -> Result<(), ValidationError> {
    if choices.len() != CHOICE_COUNT || choices.iter().any(|c| c.trim().is_empty()) {
        let mut err = ValidationError::new("choices");
        err.message = Some("Exactly four non-empty choices are required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateTestRequest {
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[serde(rename = "scheduledDate")]
    pub scheduled_at: NaiveDateTime,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
    #[serde(rename = "classId")]
    pub class_id: i64,
    #[serde(rename = "teacherId")]
    pub teacher_id: i64,
    #[validate(length(min = 1, message = "At least one question is required"), nested)]
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestResponse {
    pub message: String,
    #[serde(rename = "testId")]
    pub test_id: i64,
}
