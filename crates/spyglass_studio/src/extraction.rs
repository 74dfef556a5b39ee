//! Pulling structured data out of model replies.
//!
//! Models wrap JSON in markdown fences or pad it with commentary even when
//! told not to. Extraction tries the common packaging shapes before giving
//! up: a fenced code block first, then the first balanced brace group.

use spyglass_core::AudienceBrief;
use spyglass_error::{SpyglassResult, StudioError, StudioErrorKind};
use tracing::error;

/// Parse the fixed-shape audience brief out of a model reply.
///
/// # Errors
///
/// Fails when the reply holds no JSON object, or when the object does not
/// match the brief's three-key shape.
///
/// # Examples
///
/// ```
/// use spyglass_studio::parse_brief;
///
/// let reply = "Here you go:\n```json\n{\"pain_point\": \"no sales\", \
///     \"promise\": \"first sale in 7 days\", \"audience\": \"new sellers\"}\n```";
/// let brief = parse_brief(reply).unwrap();
/// assert_eq!(brief.audience(), "new sellers");
/// ```
pub fn parse_brief(reply: &str) -> SpyglassResult<AudienceBrief> {
    let json = extract_json_object(reply)?;

    serde_json::from_str(&json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        error!(error = %e, json_preview = %preview, "audience brief did not match expected shape");
        StudioError::new(StudioErrorKind::BriefExtraction(format!(
            "reply JSON did not match the expected shape: {e}"
        )))
        .into()
    })
}

/// Extract a JSON object from a reply that may contain markdown or extra
/// text. Tries a fenced code block first, then the first balanced brace
/// group.
pub fn extract_json_object(reply: &str) -> SpyglassResult<String> {
    if let Some(fenced) = fenced_block(reply, "json") {
        if fenced.contains('{') {
            if let Some(object) = balanced_braces(&fenced) {
                return Ok(object);
            }
        }
    }

    if let Some(object) = balanced_braces(reply) {
        return Ok(object);
    }

    error!(reply_chars = reply.chars().count(), "no JSON object in model reply");
    Err(StudioError::new(StudioErrorKind::BriefExtraction(
        "reply contained no JSON object".to_string(),
    ))
    .into())
}

/// Strip a markdown code fence that wraps the entire reply, returning the
/// inner content. Replies without a wrapping fence pass through verbatim.
///
/// # Examples
///
/// ```
/// use spyglass_studio::strip_code_fence;
///
/// let fenced = "```html\n<html><body>hi</body></html>\n```";
/// assert_eq!(strip_code_fence(fenced), "<html><body>hi</body></html>");
///
/// let bare = "<html><body>hi</body></html>";
/// assert_eq!(strip_code_fence(bare), bare);
/// ```
pub fn strip_code_fence(reply: &str) -> String {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return reply.to_string();
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return reply.to_string();
    };

    // The opening-fence line may carry a language tag; content starts on
    // the next line. Single-line fences hold content only.
    let content = match inner.find('\n') {
        Some(newline) => &inner[newline + 1..],
        None => inner,
    };
    content.trim_end().to_string()
}

/// Content of the first fenced code block, preferring fences tagged with
/// `language`, falling back to an untagged fence. A missing closing fence
/// means a truncated reply; everything after the opening fence is used.
fn fenced_block(reply: &str, language: &str) -> Option<String> {
    let tagged = format!("```{language}");

    if let Some(start) = reply.find(&tagged) {
        let content_start = start + tagged.len();
        return match reply[content_start..].find("```") {
            Some(end) => Some(reply[content_start..content_start + end].trim().to_string()),
            None => Some(reply[content_start..].trim().to_string()),
        };
    }

    let start = reply.find("```")?;
    let content_start = start + 3;
    // Skip the rest of the opening line in case it carries another tag.
    let skip_to = reply[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match reply[skip_to..].find("```") {
        Some(end) => Some(reply[skip_to..skip_to + end].trim().to_string()),
        None => Some(reply[skip_to..].trim().to_string()),
    }
}

/// First balanced `{ … }` group, tracking string literals and escapes so
/// braces inside JSON strings do not miscount.
fn balanced_braces(reply: &str) -> Option<String> {
    let start = reply.find('{')?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in reply[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(reply[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
