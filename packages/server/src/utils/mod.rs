pub mod ident;
pub mod lineage;
pub mod merge;
pub mod object_key;
