use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    Admin,
}

/// The identity the auth collaborator resolves a login to. This crate only
/// consumes it; credentials never pass through here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn teacher(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            role: Role::Teacher,
        }
    }

    pub fn student(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            role: Role::Student,
        }
    }
}
