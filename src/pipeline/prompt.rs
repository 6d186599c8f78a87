use crate::openai::types::ChatMessage;

const ELI5_TEMPLATE: &str = "You are a professor and expert in explaining complex topics in a way that is easy to understand. 
Your job is to answer the provided question so that even a 5 year old can understand it. 
You have provided with relevant background context to answer the question.

Question: {question} 

Context: {context}

Answer:";

/// Fill the template. Substitution is single-pass, so braces inside the
/// question or context are never re-expanded.
pub fn format_prompt(question: &str, context: &str) -> String {
    let mut out = String::with_capacity(ELI5_TEMPLATE.len() + question.len() + context.len());
    let mut rest = ELI5_TEMPLATE;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{question}") {
            out.push_str(question);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{context}") {
            out.push_str(context);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// System message carrying the filled prompt, followed by the raw question as the user turn.
pub fn build_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format_prompt(question, context)),
        ChatMessage::user(question),
    ]
}
