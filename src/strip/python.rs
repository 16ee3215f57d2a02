//! Python comment removal.
//!
//! Triple-quoted regions get their own state, separate from the generic
//! block-comment machinery: their interior is never scanned for `#`.
//! A same-line triple-quoted span is excised; a multi-line region is
//! removed through its closing delimiter, keeping any trailing text.

const TRIPLE_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

pub fn strip_python(text: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut open_delimiter: Option<&'static str> = None;

    for line in text.split('\n') {
        if let Some(delimiter) = open_delimiter {
            if let Some(idx) = line.find(delimiter) {
                open_delimiter = None;
                let rest = &line[idx + delimiter.len()..];
                if !rest.trim().is_empty() {
                    kept.push(rest.to_string());
                }
            }
            continue;
        }

        let mut processed = line.to_string();
        for delimiter in TRIPLE_DELIMITERS {
            if let Some(idx) = processed.find(delimiter) {
                match processed[idx + delimiter.len()..].find(delimiter) {
                    Some(rel) => {
                        let close = idx + delimiter.len() + rel;
                        processed = format!(
                            "{}{}",
                            &processed[..idx],
                            &processed[close + delimiter.len()..]
                        );
                    }
                    None => {
                        processed.truncate(idx);
                        open_delimiter = Some(delimiter);
                    }
                }
                break;
            }
        }

        if open_delimiter.is_none() {
            if let Some(idx) = find_hash_comment(&processed) {
                processed.truncate(idx);
            }
        }
        kept.push(processed);
    }

    kept.join("\n")
}

/// Byte offset of the first `#` outside any single/double-quoted string.
fn find_hash_comment(line: &str) -> Option<usize> {
    let mut in_string = false;
    let mut quote = ' ';
    let mut chars = line.char_indices();

    while let Some((idx, c)) = chars.next() {
        if in_string {
            if c == '\\' {
                chars.next();
                continue;
            }
            if c == quote {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                in_string = true;
                quote = c;
            }
            '#' => return Some(idx),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_comment_stripped() {
        assert_eq!(strip_python("x = 1  # note"), "x = 1  ");
    }

    #[test]
    fn comment_only_line_becomes_blank() {
        // unlike the generic scanner, the line survives as an empty line
        assert_eq!(strip_python("# just a comment\nx = 1"), "\nx = 1");
    }

    #[test]
    fn hash_inside_string_survives() {
        let line = "url = \"http://host/#anchor\"";
        assert_eq!(strip_python(line), line);
        let line = "s = 'a # b'";
        assert_eq!(strip_python(line), line);
    }

    #[test]
    fn escaped_quote_in_string() {
        let line = r##"s = "he said \"#1\"" "##;
        assert_eq!(strip_python(line), line);
    }

    #[test]
    fn multi_line_docstring_removed() {
        let input = "def f():\n    \"\"\"\n    Docs here.\n    \"\"\"\n    return 1";
        // the indentation before the opening delimiter survives as a
        // whitespace-only line for the normalizer to prune
        assert_eq!(strip_python(input), "def f():\n    \n    return 1");
    }

    #[test]
    fn same_line_docstring_excised() {
        assert_eq!(strip_python("x = 1\n\"\"\"doc\"\"\"\ny = 2"), "x = 1\n\ny = 2");
    }

    #[test]
    fn trailing_text_after_closing_delimiter_kept() {
        let input = "\"\"\"\ndoc body\n\"\"\" tail = 1";
        assert_eq!(strip_python(input), "\n tail = 1");
    }

    #[test]
    fn single_quoted_docstring() {
        let input = "'''\nnotes\n'''\nz = 3";
        assert_eq!(strip_python(input), "\nz = 3");
    }

    #[test]
    fn unterminated_docstring_swallows_rest() {
        let input = "a = 1\n\"\"\"\nnever closed\nb = 2";
        assert_eq!(strip_python(input), "a = 1\n");
    }

    #[test]
    fn hash_interior_of_docstring_untouched() {
        let input = "\"\"\"\n# not a comment, just prose\n\"\"\"\nx = 1";
        assert_eq!(strip_python(input), "\nx = 1");
    }
}
