// src/types/mod.rs

pub mod pagination;
pub mod query;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationMeta, PaginationQuery};
pub use query::{SortOrder, SortQuery};
pub use response::ApiResponse;
