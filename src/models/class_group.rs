use serde::{Deserialize, Serialize};

/// A class group tests are scheduled against, e.g. CSE year 2 section A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: i64,
    pub department: String,
    pub year: i32,
    pub section: String,
}

impl ClassGroup {
    /// Display label for class selectors.
    pub fn label(&self) -> String {
        format!("{} - Year {} - Section {}", self.department, self.year, self.section)
    }
}
