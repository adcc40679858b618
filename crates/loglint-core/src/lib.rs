//! Core functionality for the loglint logging-call linter
//!
//! This crate provides:
//! - recognition of logging calls and of their message and field arguments
//! - the checking rules and their diagnostics and fixes
//! - configuration management
//!
//! Parsing and name resolution belong to the host, which hands over
//! expression trees ([`syntax`]) and a resolver ([`resolve::TypesInfo`]).

pub mod utils;

pub mod check;
pub mod classify;
pub mod config;
pub mod constant;
pub mod diagnostic;
pub mod error;
pub mod fix;
pub mod registry;
pub mod resolve;
pub mod rules;
pub mod syntax;
pub mod toml;
