//! Data types for the extraction workflow and the evaluation model.

pub mod document;
pub mod evaluation;
pub mod upload;
