// src/repository/mod.rs

pub mod department_repository;
pub mod hierarchy_store;
pub mod permission_repository;
pub mod role_repository;
pub mod team_repository;
pub mod user_repository;
