//! Small text helpers shared by the recognizers.

/// Remove `//` line comments and `/* */` block comments.
///
/// String and character literals are copied through untouched, so a `//`
/// inside `"http://..."` is not a comment. Newlines are kept so line
/// structure survives. An unterminated block comment swallows the rest of
/// the text.
pub fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = skip_literal(bytes, i),
            // `'` inside a number is a digit separator (`1'000`)
            b'\'' if i == 0 || !bytes[i - 1].is_ascii_alphanumeric() => i = skip_literal(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&text[copied..i]);
                i = text[i..].find('\n').map_or(bytes.len(), |nl| i + nl);
                copied = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&text[copied..i]);
                let end = text[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |close| i + 2 + close + 2);
                out.extend(text[i..end].chars().filter(|&c| c == '\n'));
                i = end;
                copied = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Offset just past the literal opened by the quote at `start`. A literal
/// never spans a newline.
fn skip_literal(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Split on `sep` where it is not nested inside `<>`, `()`, `[]` or `{}`,
/// or inside a string or character literal.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = ' ';

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev = c;
            continue;
        }

        match c {
            '"' => quote = Some(c),
            '\'' if !prev.is_ascii_alphanumeric() => quote = Some(c),
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            c if c == sep && depth <= 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&text[start..]);
    parts
}

/// Text before the first top-level `=` (drops default values and
/// enumerator initializers).
pub fn before_assignment(text: &str) -> &str {
    split_top_level(text, '=')[0]
}

/// Skip whitespace and comments starting at `pos`; returns the offset of the
/// next significant character (or `text.len()`).
pub fn skip_trivia(text: &str, mut pos: usize) -> usize {
    loop {
        let rest = &text[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        if trimmed.starts_with("//") {
            pos += trimmed.find('\n').map_or(trimmed.len(), |nl| nl + 1);
        } else if trimmed.starts_with("/*") {
            pos += trimmed[2..].find("*/").map_or(trimmed.len(), |close| close + 4);
        } else {
            return pos;
        }
    }
}
