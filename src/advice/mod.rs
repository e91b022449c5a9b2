//! Career advice for parsed candidates

pub mod advisor;
pub mod prompts;

pub use advisor::{advice_or_fallback, AdviceGenerator, RuleBasedAdvisor, ADVICE_FALLBACK};
pub use prompts::{PromptParams, PromptTemplates};
