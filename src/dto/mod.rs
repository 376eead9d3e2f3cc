pub mod result_dto;
pub mod test_dto;
