use crate::dto::test_dto::NewQuestion;
use crate::error::{Error, Result};
use crate::models::question::CHOICE_COUNT;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionDocument {
    questions: Vec<NewQuestion>,
}

pub struct ImportService;

impl ImportService {
    /// Parses an uploaded question document: a JSON object whose single
    /// field `questions` holds `{question, choices[4], correctAnswer,
    /// score}` records. Parsing is all-or-nothing; one malformed record
    /// rejects the whole document. Only shape is checked here; semantic
    /// bounds are enforced when the test is scheduled.
    pub fn parse_question_document(doc: &str) -> Result<Vec<NewQuestion>> {
        let document: QuestionDocument =
            serde_json::from_str(doc).map_err(|e| Error::Structural(e.to_string()))?;

        for (idx, q) in document.questions.iter().enumerate() {
            if q.choices.len() != CHOICE_COUNT {
                return Err(Error::Structural(format!(
                    "Question {} has {} choices, expected {}",
                    idx + 1,
                    q.choices.len(),
                    CHOICE_COUNT
                )));
            }
        }

        Ok(document.questions)
    }
}
