// src/lib.rs
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod middleware;
pub mod repository;
pub mod service;
pub mod types;
pub mod utils;

// 共通型の再エクスポート
pub use error::{AppError, AppResult};
pub use types::ApiResponse;
