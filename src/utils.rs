/// Truncate body for logging, adding ellipsis if truncated
pub fn truncate_body(body: &str, max_len: usize) -> String {
    let body = body.trim();
    if body.len() <= max_len {
        return body.to_string();
    }

    let mut cut = max_len;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!(
        "{}...[truncated, {} bytes total]",
        &body[..cut],
        body.len()
    )
}
