// src/api/handlers/mod.rs

pub mod department_handler;
pub mod permission_handler;
pub mod role_handler;
pub mod team_handler;
pub mod user_handler;
