use serde::{Deserialize, Serialize};

pub const CHOICE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: i64,
    pub question: String,
    pub choices: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: u32,
    pub score: i32,
}

impl Question {
    pub fn is_correct(&self, chosen_index: u32) -> bool {
        chosen_index == self.correct_answer
    }
}
