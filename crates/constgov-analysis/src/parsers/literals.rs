//! Go literal and comment text helpers.

/// Parse a Go integer literal (`42`, `0x2A`, `0o52`, `052`, `0b101010`, `1_000`).
///
/// Returns `None` for anything that is not an integer literal or that does
/// not fit in an `i64`.
pub fn parse_go_int(text: &str) -> Option<i64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }

    let (digits, radix) = if let Some(rest) = strip_prefix_ci(&cleaned, "0x") {
        (rest, 16)
    } else if let Some(rest) = strip_prefix_ci(&cleaned, "0b") {
        (rest, 2)
    } else if let Some(rest) = strip_prefix_ci(&cleaned, "0o") {
        (rest, 8)
    } else if cleaned.len() > 1 && cleaned.starts_with('0') {
        (&cleaned[1..], 8)
    } else {
        (cleaned.as_str(), 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

/// Strip `//` or `/* */` markers from a raw comment, one entry per line.
pub fn comment_lines(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if let Some(body) = raw.strip_prefix("//") {
        return vec![body.trim().to_string()];
    }
    let body = raw
        .strip_prefix("/*")
        .map(|b| b.strip_suffix("*/").unwrap_or(b))
        .unwrap_or(raw);
    body.lines()
        .map(|line| line.trim().trim_start_matches('*').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Target of the first `@see` annotation, e.g. `OrderStatusEnum.PENDING_PAYMENT`.
pub fn see_tag(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        let (_, rest) = line.split_once("@see")?;
        let target: String = rest
            .trim_start()
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != ')' && *c != '，' && *c != ',')
            .collect();
        (!target.is_empty()).then_some(target)
    })
}
