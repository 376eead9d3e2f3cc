use crate::models::question::Question;
use std::collections::HashMap;

pub struct ScoringService;

impl ScoringService {
    /// Computes `(earned_score, total_score)` for an answer mapping. The
    /// total sums every question's score unconditionally; a question earns
    /// its score only when the chosen index equals its correct index. No
    /// partial credit, no negative marking.
    pub fn score(questions: &[Question], answers: &HashMap<i64, u32>) -> (i32, i32) {
        let mut total_score = 0;
        let mut earned_score = 0;

        for q in questions {
            total_score += q.score;
            if let Some(&chosen) = answers.get(&q.id) {
                if q.is_correct(chosen) {
                    earned_score += q.score;
                }
            }
        }

        (earned_score, total_score)
    }
}
