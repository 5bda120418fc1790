// src/service/mod.rs

pub mod department_service;
pub mod permission_service;
pub mod role_service;
pub mod team_service;
pub mod user_service;
