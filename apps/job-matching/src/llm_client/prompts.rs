// Shared prompt fragments.
// Each agent that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction appended to all generation prompts.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim about the candidate must be traceable to the candidate profile \
    provided below (summary, work history, skills). Do NOT invent employers, titles, \
    dates, metrics or certifications. If the profile does not support a claim, omit it.";

/// Instruction appended to prompts that receive gap information.
pub const HONESTY_INSTRUCTION: &str = "\
    Never claim a skill listed under GAPS. You may mention willingness to learn it \
    or point at a related transferable skill, but do not present it as experience.";

/// Fills `{name}` placeholders in a single pass.
///
/// Substituted text is never rescanned, so a value containing `{profile_json}` stays
/// literal. Braces that do not name a known placeholder (JSON examples) are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match hit {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
