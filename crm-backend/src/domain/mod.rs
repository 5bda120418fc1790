// src/domain/mod.rs

pub mod department_model;
pub mod permission_model;
pub mod role_model;
pub mod role_permission_model;
pub mod team_member_model;
pub mod team_model;
pub mod user_model;
pub mod user_permission_model;
pub mod user_role_model;
