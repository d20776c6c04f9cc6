pub mod config;
pub mod dates;
pub mod inspect;
pub mod parse;

use resumex_core::config::schema::ParserConfig;
use resumex_core::error::ResumeError;
use std::path::PathBuf;

/// Config from `--config`, or the built-in defaults.
fn load_parser_config(path: Option<PathBuf>) -> Result<ParserConfig, ResumeError> {
    match path {
        Some(path) => resumex_core::config::load_config(&path),
        None => Ok(ParserConfig::default()),
    }
}
