// Job-fit analysis: document extraction → two sanitization passes → comparison.
// All generation calls go through ai_client::TextGenerator.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
