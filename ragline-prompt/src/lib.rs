mod template;

use std::collections::HashMap;

use thiserror::Error;

pub use template::PromptTemplate;

/// The fixed grounding prompt: retrieved passages inside `<context>`,
/// the literal question inside `<question>`.
pub const RAG_TEMPLATE: &str = "\
Use the following pieces of information enclosed in <context> tags to provide \
an answer to the question enclosed in <question> tags.
<context>
{{ context }}
</context>
<question>
{{ question }}
</question>";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("invalid prompt template: {0}")]
    InvalidTemplate(String),
}

/// Assembles the completion prompt from the question and the retrieved
/// chunk texts, joined by newlines in retrieval order.
pub fn rag_prompt(question: &str, contexts: &[String]) -> Result<String, PromptError> {
    let mut vars = HashMap::new();
    vars.insert("context".to_string(), contexts.join("\n"));
    vars.insert("question".to_string(), question.to_string());
    PromptTemplate::new(RAG_TEMPLATE).render(&vars)
}
