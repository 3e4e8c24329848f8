//! Formatters for the aggregate finding list. These consume what the
//! engine produces and never feed anything back into it.

pub mod summary;
pub mod terminal;
