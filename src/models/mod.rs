pub mod class_group;
pub mod identity;
pub mod question;
pub mod result;
