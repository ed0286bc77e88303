//! Report assembly and output formats

pub mod formatter;
pub mod report;
