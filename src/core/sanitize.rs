// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Make a page title usable as a file stem. Keeps spaces and dashes so
/// `"QNpt S15 - Semana 7"` stays readable; replaces path separators and
/// characters Windows refuses with `_`.
pub fn sanitize_file_stem(title: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.chars() {
        match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    let out = normalize_ws(&out);
    let out = out.trim_matches('.').trim().to_string();
    if out.is_empty() { s!(fallback) } else { out }
}
