//! Marker-driven line scanner shared by every family except python and
//! the markup composites.

use super::rules::CommentSyntax;

/// Strip comments from `text` using the given marker set.
///
/// Lines are scanned left to right with string-literal awareness. A block
/// comment left open at end of input swallows the remaining text.
pub fn strip_with(text: &str, syntax: CommentSyntax) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut in_block = false;

    for line in text.split('\n') {
        if in_block {
            let Some((_, end)) = syntax.block else { continue };
            let Some(idx) = line.find(end) else { continue };
            in_block = false;
            let rest = &line[idx + end.len()..];
            if !rest.trim().is_empty() {
                if let Some(processed) = scan_line(rest, syntax, &mut in_block) {
                    kept.push(processed);
                }
            }
            continue;
        }
        if let Some(processed) = scan_line(line, syntax, &mut in_block) {
            kept.push(processed);
        }
    }

    kept.join("\n")
}

/// Scan one line. Returns the surviving text, or `None` when the line was
/// consumed by a comment (blank source lines survive as blank).
fn scan_line(line: &str, syntax: CommentSyntax, in_block: &mut bool) -> Option<String> {
    let mut out = String::with_capacity(line.len());
    let mut in_string = false;
    let mut delimiter: &str = "";
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        if !in_string {
            if let Some(d) = syntax.string_delimiters.iter().find(|d| rest.starts_with(**d)) {
                in_string = true;
                delimiter = d;
                out.push_str(d);
                pos += d.len();
                continue;
            }
        }

        if in_string {
            if let Some(after) = rest.strip_prefix('\\') {
                // escape: the backslash and the next char pass through
                out.push('\\');
                pos += 1;
                if let Some(c) = after.chars().next() {
                    out.push(c);
                    pos += c.len_utf8();
                }
                continue;
            }
            if rest.starts_with(delimiter) {
                out.push_str(delimiter);
                pos += delimiter.len();
                in_string = false;
                continue;
            }
            let c = rest.chars().next().expect("pos < len");
            out.push(c);
            pos += c.len_utf8();
            continue;
        }

        if let Some((start, end)) = syntax.block {
            if rest.starts_with(start) {
                match rest[start.len()..].find(end) {
                    // closed on the same line: drop just the enclosed span
                    Some(rel) => {
                        pos += start.len() + rel + end.len();
                        continue;
                    }
                    None => {
                        *in_block = true;
                        break;
                    }
                }
            }
        }

        if syntax.line_markers.iter().any(|m| rest.starts_with(m)) {
            break;
        }

        let c = rest.chars().next().expect("pos < len");
        out.push(c);
        pos += c.len_utf8();
    }

    if !out.is_empty() || (!*in_block && line.trim().is_empty()) {
        Some(out)
    } else {
        None
    }
}
