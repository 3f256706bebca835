//! Tabular input adapters
//!
//! Reads the children, funding and roster tables from CSV. Columns are
//! located by header text rather than position because the upstream exports
//! reorder and rename them freely.

pub mod columns;
pub mod dates;
pub mod tables;

pub use columns::{ChildrenColumns, FundingColumns, RosterColumns};
pub use dates::parse_date;
pub use tables::{
    load_allocations, load_children, load_roster_into, read_allocations, read_children,
    read_roster_into,
};
