//! Response normalization.
//!
//! Models wrap their answer in markdown fences despite being told not to.
//! Only the outermost markers are removed; the diagram body is untouched.

/// Opening fence naming the diagram language
const LANGUAGE_FENCE: &str = "```mermaid";

/// Bare fence, opening or closing
const BARE_FENCE: &str = "```";

/// Strip one optional leading fence and one optional trailing fence, then
/// trim surrounding whitespace.
///
/// The leading marker is either "```mermaid" or a bare "```", whichever
/// matches first. Each position is stripped at most once. A strip is only
/// kept when the result no longer begins or ends with a fence, so the
/// output is always a fixed point. Nested fences come back trimmed but
/// otherwise as received.
pub fn normalize_response(raw: &str) -> String {
    let text = raw.trim();

    let after_lead = strip_leading_fence(text).unwrap_or(text);
    let both = strip_trailing_fence(after_lead).unwrap_or(after_lead);
    let trail_only = strip_trailing_fence(text).unwrap_or(text);

    [both, after_lead, trail_only]
        .into_iter()
        .find(|candidate| !has_edge_fence(candidate))
        .unwrap_or(text)
        .to_string()
}

fn strip_leading_fence(text: &str) -> Option<&str> {
    text.strip_prefix(LANGUAGE_FENCE)
        .or_else(|| text.strip_prefix(BARE_FENCE))
        .map(str::trim)
}

fn strip_trailing_fence(text: &str) -> Option<&str> {
    text.trim_end().strip_suffix(BARE_FENCE).map(str::trim)
}

/// Both fence markers begin with a bare fence
fn has_edge_fence(text: &str) -> bool {
    text.starts_with(BARE_FENCE) || text.ends_with(BARE_FENCE)
}
