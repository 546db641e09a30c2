pub mod case_context;
pub mod json;
