//! Prompt construction for alternative generation

use crate::types::GenerationRequest;

/// Placeholder used when the user gave no context
pub const NO_CONTEXT: &str = "Not provided by the user";

pub const SYSTEM_PROMPT: &str = r#"You are a decision-making expert who generates concrete, specific alternatives.

MANDATORY RULES:
1. Each alternative must be a REAL and DISTINCT option the user can choose
2. Alternatives must be MUTUALLY EXCLUSIVE whenever possible
3. NEVER use generic verbs such as: "evaluate", "analyze", "consult", "study", "define", "plan", "consider"
4. NEVER produce process steps, checklists, best practices or abstract advice
5. Alternatives must be SPECIFIC, OBJECTIVE and directly tied to the given context
6. Each alternative must be a concrete action the user can decide to take

CORRECT EXAMPLES:
- "Use Next.js with a hosted Postgres backend" (technology alternative)
- "Move to a capital city with more services" (location alternative)
- "Hire a freelance developer" (resourcing alternative)

INCORRECT EXAMPLES (NEVER DO THIS):
- "Weigh the pros and cons of each option" (process, not a decision)
- "Consult experts in the field" (advice, not an alternative)
- "Define success criteria" (methodology, not a choice)

If the context is too vague, produce general alternatives that are still concrete and actionable.

Reply ONLY with JSON in the format: {"alternatives": ["alternative 1", "alternative 2", "alternative 3"]}"#;

/// Build the user message for a request
pub fn build_user_prompt(request: &GenerationRequest) -> String {
    let description = request.description.trim();
    let context = if description.is_empty() {
        NO_CONTEXT
    } else {
        description
    };

    format!(
        r#"Generate {count} concrete decision alternatives for:

DECISION TITLE: {title}

CONTEXT: {context}

Remember: alternatives must be REAL choices, not suggestions about process or methodology."#,
        count = request.count,
        title = request.title.trim(),
        context = context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_request() {
        let request = GenerationRequest::new("Choose a stack", "Small team, ships in 3 months", 4);
        let prompt = build_user_prompt(&request);

        assert!(prompt.contains("Generate 4 concrete"));
        assert!(prompt.contains("DECISION TITLE: Choose a stack"));
        assert!(prompt.contains("CONTEXT: Small team, ships in 3 months"));
        assert!(!prompt.contains(NO_CONTEXT));
    }

    #[test]
    fn test_missing_context_is_flagged() {
        let request = GenerationRequest::new("Choose a stack", "   ", 3);
        let prompt = build_user_prompt(&request);
        assert!(prompt.contains(&format!("CONTEXT: {}", NO_CONTEXT)));
    }

    #[test]
    fn test_system_prompt_demands_json_array() {
        assert!(SYSTEM_PROMPT.contains(r#"{"alternatives": ["#));
        assert!(SYSTEM_PROMPT.contains("MUTUALLY EXCLUSIVE"));
    }
}
