// AI assistant domain: prompt registry, response interpretation and the
// pipeline that ties them to a provider.
pub mod interpreter;
pub mod models;
pub mod prompts;
pub mod service;

pub use interpreter::{
    interpret, parse_lines, CompletionResult, Interpretation, JsonOutcome, UnparsedResponse,
    UNPARSED_ERROR,
};
pub use models::*;
pub use prompts::{
    BuiltPrompt, ExpectedShape, ObjectSchema, PromptArgs, PromptRegistry, PromptSpec, TaskId,
    UnknownTask, SYSTEM_PROMPT_ARG,
};
pub use service::{AssistantError, AssistantService, CompletionRequest};
