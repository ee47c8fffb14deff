//! Line-oriented layout helpers

use rfi_format::lexer::is_hspace;

/// Offset of the first byte of the line containing `pos`
pub fn line_start(src: &str, pos: usize) -> usize {
    src[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Offset of the line break ending the line that contains `pos`, or EOF
pub fn line_end(src: &str, pos: usize) -> usize {
    match src[pos..].find('\n') {
        Some(i) if i > 0 && src.as_bytes()[pos + i - 1] == b'\r' => pos + i - 1,
        Some(i) => pos + i,
        None => src.len(),
    }
}

/// Length of the line break at `pos` (0 at EOF or when none starts there)
pub fn line_break_len(src: &str, pos: usize) -> usize {
    let rest = &src.as_bytes()[pos..];
    if rest.starts_with(b"\r\n") {
        2
    } else if rest.starts_with(b"\n") {
        1
    } else {
        0
    }
}

/// Whether `pos` is at a line break or EOF
pub fn at_line_end(src: &str, pos: usize) -> bool {
    pos >= src.len() || line_break_len(src, pos) > 0
}

/// Skip spaces and tabs
pub fn skip_hspace(src: &str, mut pos: usize) -> usize {
    let bytes = src.as_bytes();
    while pos < bytes.len() && is_hspace(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Whether only spaces and tabs precede `pos` on its line
pub fn starts_line(src: &str, pos: usize) -> bool {
    src.as_bytes()[line_start(src, pos)..pos]
        .iter()
        .all(|&b| is_hspace(b))
}

/// If the rest of the line after `pos` is blank or a line comment, the
/// offset of its line break (or EOF)
pub fn blank_rest_of_line(src: &str, pos: usize) -> Option<usize> {
    let pos = skip_hspace(src, pos);
    if src[pos..].starts_with("//") {
        return Some(line_end(src, pos));
    }
    at_line_end(src, pos).then_some(pos)
}

/// Line ending used by the file
pub fn line_ending(src: &str) -> &'static str {
    if src.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_bounds_handle_crlf() {
        let src = "a,\r\n  b, // note\r\nc";
        assert_eq!(line_start(src, 6), 4);
        assert_eq!(line_end(src, 6), 16);
        assert_eq!(line_break_len(src, 16), 2);
        assert_eq!(line_ending(src), "\r\n");
    }

    #[test]
    fn blank_rest_of_line_accepts_trailing_comment() {
        let src = "  b, // note\nc";
        assert_eq!(blank_rest_of_line(src, 4), Some(12));
        assert_eq!(blank_rest_of_line("  b, c\n", 4), None);
        assert_eq!(blank_rest_of_line("  b,", 4), Some(4));
    }

    #[test]
    fn starts_line_ignores_indentation() {
        let src = "{\n    key: 1, other: 2 }";
        assert!(starts_line(src, 6));
        assert!(!starts_line(src, 14));
    }
}
