pub mod dimension;
pub mod entry_kind;
pub mod similarity;
