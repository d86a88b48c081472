// OSINT Framework - API Core
//
// Backend for the OSINT dashboard's AI assistant: prompt templates per
// analysis task, an OpenRouter-backed completion adapter, response
// interpretation, and the JSON HTTP gateway in front of them.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
