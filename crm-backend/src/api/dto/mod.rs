// src/api/dto/mod.rs

pub mod department_dto;
pub mod permission_dto;
pub mod role_dto;
pub mod team_dto;
pub mod user_dto;
