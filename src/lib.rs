pub mod aggregate;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod common;
pub mod constants;
pub mod county;
pub mod credentials;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod measures;
pub mod merge;
pub mod output;
pub mod pivot;
pub mod row;
pub mod sources;
pub mod topics;
pub mod value;
