use regex::Regex;

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Extract the attachment filename from a `Content-Disposition` header value.
/// Handles both the quoted and the bare form.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let re = Regex::new(r#"filename="([^"]+)"|filename=([^";\s]+)"#).ok()?;
    let caps = re.captures(header)?;
    let name = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim())?;

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
