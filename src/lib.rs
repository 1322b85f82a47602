//! school_orm library - typed relational mapping for a school schema
//!
//! Provides the schema and relationship map, a CozoDB storage backend, the
//! mapping layer (validation, relationship enforcement, CRUD and query
//! composition), and the demo workflow driven by the CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod demo;
pub mod model;
pub mod orm;
pub mod output;

#[cfg(test)]
pub mod test_utils;
