//! Per-login workflow state for the three user-facing screens.

pub mod authoring;
pub mod review;
pub mod student;
