pub mod statement;

pub use statement::{ListParams, SortDirection, StatementService};
