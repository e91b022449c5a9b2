//! Resume parsing and semantic job matching

pub mod advice;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod output;
pub mod processing;
pub mod service;

pub use config::Config;
pub use error::{CareerMatcherError, Result};
