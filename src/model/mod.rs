pub mod bug;
pub mod common;
pub mod global_error;

pub use bug::{BugQuery, BugRequest, BugResponse};
pub use common::ApiResponse;
pub use global_error::{AppError, ErrorCode};
