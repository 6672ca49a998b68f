//! Shared request/response helpers used by several handlers.

mod pagination;
mod response;

pub use pagination::PaginationParams;
pub use response::{Created, NoContent};
