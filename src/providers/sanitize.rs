//! Provider error bodies pass through here before they enter error messages.

const MAX_API_ERROR_CHARS: usize = 200;

/// Markers whose following token is a credential, not diagnostics.
const SECRET_MARKERS: [&str; 5] = [
    "Bearer ",
    "sk-",
    "api_key=",
    "\"api_key\":\"",
    "access_token=",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn redact_after(text: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(marker) {
        let token_start = search_from + rel + marker.len();
        let token_len = text[token_start..]
            .chars()
            .take_while(|c| is_token_char(*c))
            .map(char::len_utf8)
            .sum::<usize>();
        if token_len == 0 {
            search_from = token_start;
            continue;
        }
        text.replace_range(token_start..token_start + token_len, "[REDACTED]");
        search_from = token_start + "[REDACTED]".len();
    }
}

/// Scrub credential-shaped tokens and cap the length of an API error body.
///
/// Provider error payloads sometimes echo request headers back; anything
/// following a known secret marker is replaced before the text can reach a
/// log line or error chain.
pub fn sanitize_api_error(body: &str) -> String {
    let mut scrubbed = body.to_string();
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker);
    }

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed;
    }

    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &scrubbed[..end])
}
