//! Tolerant field extraction from rewritten funding announcements.
//!
//! The rewrite oracle is not byte-exact, so label matching is driven by an
//! alias table (English + Bahasa Melayu labels) and shrugs off minor drift:
//! leading list dashes, markdown bold markers, stray quotes, trailing colons.
//! Unknown lines are ignored. Extraction succeeds iff a project name was
//! located; everything else is best-effort.

use fundwire_core::{HasToken, StructuredFields};
use regex::Regex;

/// Label aliases, lowercase. Label rules are checked per line in a fixed
/// order: name, investors, description, social, then the `|`-separated
/// money line. The money line is matched by token *containment* and must run
/// last so a description that mentions an amount keeps its own line.
const NAME_ALIASES: &[&str] = &["name", "nama"];
const INVESTOR_ALIASES: &[&str] = &["investors", "pelabur"];
const DESCRIPTION_ALIASES: &[&str] = &["description", "deskripsi"];
const SOCIAL_ALIASES: &[&str] = &["twitter"];
const AMOUNT_ALIASES: &[&str] = &["raised", "dana", "amount"];
const STAGE_ALIASES: &[&str] = &["stage", "fasa"];
const TOKEN_ALIASES: &[&str] = &["has token", "has-token", "ada token"];
/// Parenthesized values meaning "the project has a token".
const YES_TOKENS: &[&str] = &["ada", "yes"];

/// Parse a rewritten announcement into structured fields.
///
/// Line-oriented single pass. Returns `None` — "no structured data", not an
/// error — when no name-like line (or first-line fallback) was found.
#[must_use]
pub fn extract(text: &str) -> Option<StructuredFields> {
    let lines: Vec<&str> = text.lines().collect();
    let mut fields = StructuredFields::default();

    for (idx, raw) in lines.iter().enumerate() {
        let line = clean_line(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(value) = labeled_value(line, NAME_ALIASES) {
            // An explicit name label always wins, including over the
            // first-line fallback below.
            fields.name = clean_value(value);
            continue;
        }

        // First-line fallback: "Something: ..." names the project when the
        // first line is not an explicit name label. Fires at most once.
        // Known heuristic risk: an unrelated colon-bearing first line
        // misfires — preserved behavior.
        if idx == 0 && fields.name.is_empty() {
            if let Some((before, _)) = line.split_once(':') {
                fields.name = clean_value(before);
            }
            // No `continue`: the first line may also carry money tokens.
        }

        if let Some(value) = labeled_value(line, INVESTOR_ALIASES) {
            set_if_nonempty(&mut fields.investors, clean_value(value));
            continue;
        }

        if let Some(value) = labeled_value(line, DESCRIPTION_ALIASES) {
            set_if_nonempty(&mut fields.description, clean_value(value));
            continue;
        }

        if label_matches(line, SOCIAL_ALIASES) {
            let next = lines.get(idx + 1).map(|l| clean_line(l)).unwrap_or("");
            if let Some(handle) = social_handle(line, next) {
                fields.social_handle = Some(handle);
            }
            continue;
        }

        if contains_any(line, AMOUNT_ALIASES)
            || contains_any(line, STAGE_ALIASES)
            || contains_any(line, TOKEN_ALIASES)
        {
            parse_money_line(line, &mut fields);
        }
    }

    if fields.name.is_empty() {
        None
    } else {
        Some(fields)
    }
}

/// Parse the `Raised: $X | Stage: "Y" | Has token: (Z)` line. Segments are
/// classified independently, so a reordered or partial line still yields
/// whatever it carries.
fn parse_money_line(line: &str, fields: &mut StructuredFields) {
    for segment in line.split('|') {
        let segment = segment.trim();
        if contains_any(segment, AMOUNT_ALIASES) {
            if let Some((_, value)) = segment.split_once(':') {
                set_if_nonempty(&mut fields.amount, clean_value(value));
            }
        } else if contains_any(segment, STAGE_ALIASES) {
            if let Some(value) = quoted_or_bare_value(segment) {
                set_if_nonempty(&mut fields.stage, value);
            }
        } else if contains_any(segment, TOKEN_ALIASES) {
            if let Some(inner) = parenthesized_value(segment) {
                let yes = YES_TOKENS.iter().any(|t| inner.eq_ignore_ascii_case(t));
                fields.has_token = Some(if yes { HasToken::Yes } else { HasToken::No });
            }
        }
    }
}

/// Strip the decoration a list line may carry: leading dashes/asterisks and
/// surrounding whitespace.
fn clean_line(raw: &str) -> &str {
    raw.trim().trim_start_matches(['-', '*', ' ', '\t']).trim()
}

/// Normalize a captured value: markdown bold markers, surrounding quotes,
/// trailing colons.
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches('*')
        .trim()
        .trim_end_matches(':')
        .trim()
        .trim_matches('"')
        .trim()
        .to_string()
}

/// If the line's label (text before the first `:`) starts with one of
/// `aliases`, return the remainder after that colon.
fn labeled_value<'a>(line: &'a str, aliases: &[&str]) -> Option<&'a str> {
    let (label, value) = line.split_once(':')?;
    let label = label.trim().trim_matches(['"', '*']).trim().to_lowercase();
    aliases
        .iter()
        .any(|alias| label.starts_with(alias))
        .then_some(value)
}

/// Whether the line's label (before the first `:`, or the whole line when
/// there is none) starts with one of `aliases`.
fn label_matches(line: &str, aliases: &[&str]) -> bool {
    let label = line.split(':').next().unwrap_or(line);
    let label = label.trim().trim_matches(['"', '*']).trim().to_lowercase();
    aliases.iter().any(|alias| label.starts_with(alias))
}

fn contains_any(line: &str, tokens: &[&str]) -> bool {
    let lower = line.to_lowercase();
    tokens.iter().any(|t| lower.contains(t))
}

fn set_if_nonempty(slot: &mut Option<String>, value: String) {
    if !value.is_empty() {
        *slot = Some(value);
    }
}

/// Capture a quoted value after the label, else the bare remainder after the
/// first `:`.
fn quoted_or_bare_value(segment: &str) -> Option<String> {
    let quoted = Regex::new(r#""([^"]*)""#).expect("valid quoted-value regex");
    if let Some(captures) = quoted.captures(segment) {
        let value = captures[1].trim().to_string();
        return (!value.is_empty()).then_some(value);
    }
    let (_, value) = segment.split_once(':')?;
    let value = clean_value(value);
    (!value.is_empty()).then_some(value)
}

/// Capture the first parenthesized value in the segment.
fn parenthesized_value(segment: &str) -> Option<String> {
    let parens = Regex::new(r"\(([^)]*)\)").expect("valid parenthesized regex");
    parens
        .captures(segment)
        .map(|captures| captures[1].trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The handle for a social label line: the next line when it starts with
/// `@`, else the remainder of the current line after the *last* colon when
/// that starts with `@`.
fn social_handle(line: &str, next_line: &str) -> Option<String> {
    if next_line.starts_with('@') {
        return next_line.split_whitespace().next().map(str::to_string);
    }
    let (_, after) = line.rsplit_once(':')?;
    let after = after.trim();
    after
        .starts_with('@')
        .then(|| after.split_whitespace().next().unwrap_or(after).to_string())
}
