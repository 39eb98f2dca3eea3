//! The fixed instruction payload for the template check and rewrite.

/// Builds the single-turn prompt for one post body.
///
/// The instruction pins down three things: the announcement shape the input
/// must loosely match, the sentinel answer (`null`) for anything else, and
/// the deterministic substitutions to apply when it does match — translate
/// only the description to Bahasa Melayu, relabel `Stage`/`Has token`/
/// `Twitter:`, and keep every other character and line break as-is.
#[must_use]
pub fn rewrite_prompt(body: &str) -> String {
    format!(
        r#"You are a translation assistant. Given a block of text, your job is to check if it follows this structure:

name: [Project Name]
Raised: $[Amount] | Stage: [Stage Name] | Has token: [Yes/No]
Investors: [Investor list or "Not disclosed"]
Description: [One paragraph in English]
Twitter:
@[TwitterHandle]

If the text DOES NOT loosely follow this format - respond with: null

If it does, follow these instructions:
- Keep all formatting and line breaks.
- Only translate the Description to Bahasa Melayu.
- Change "Stage" to "Fasa", "Has token" to "Ada token", and "Twitter:" to "Twitter (akaun rasmi):"
- Do not add any explanations.

Now process this:
{body}"#
    )
}
