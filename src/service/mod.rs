pub mod bug;
pub mod query;

pub use bug::BugService;
