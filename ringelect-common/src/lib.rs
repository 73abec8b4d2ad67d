pub mod observation;
pub mod types;
