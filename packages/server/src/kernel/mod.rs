//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod test_dependencies;
pub mod traits;

// Re-export AI client types
pub use openrouter_client::{OpenRouterClient, OpenRouterError};

pub use ai::OpenRouterAI;
pub use test_dependencies::{CompletionCall, MockAI};
pub use traits::*;
