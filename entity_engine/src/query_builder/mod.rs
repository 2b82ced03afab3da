//! Query builder
//!
//! Pure translation from statement requests to SQL text plus an ordered
//! parameter list. Placeholders use the `$n` style.

pub mod ordering;
pub mod pagination;
pub mod request;
pub mod sql_generation;


pub use ordering::SortOrder;
pub use pagination::Pagination;
pub use request::{
    DeleteRequest, InsertRequest, Returning, SelectRequest, SqlBuilder, Statement, UpdateRequest,
    ValueMap,
};
pub use sql_generation::SqlGenerator;
