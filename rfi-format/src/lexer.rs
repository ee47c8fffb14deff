//! Lexical scanning over object-literal source text
//!
//! All functions work on byte offsets into a `&str`. Every delimiter the
//! scanner stops at is ASCII, so returned offsets are always char boundaries.
//!
//! String literals (`"..."`, `'...'`, and template literals with `${...}`
//! substitutions) and comments are skipped opaquely. Brackets are matched with
//! an explicit stack, so nesting depth is bounded only by memory.

use crate::error::{Result, RfiError};

/// Result of scanning one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueScan {
    /// Offset one past the last significant (non-whitespace, non-comment) byte
    pub end: usize,
    /// Offset of the byte that stopped the scan, or the input length at EOF
    ///
    /// At depth zero the scan stops at `,`, `;`, or a closing bracket that
    /// belongs to the enclosing construct.
    pub terminator: usize,
}

/// Horizontal whitespace
pub fn is_hspace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Bytes that may appear in an unquoted key
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Convert a byte offset into a 1-based (line, column) pair
pub fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(src.len());
    let before = &src.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let column = src[line_start..offset].chars().count() + 1;
    (line, column)
}

fn unterminated(src: &str, construct: &'static str, start: usize) -> RfiError {
    let (line, column) = line_col(src, start);
    RfiError::Unterminated {
        construct,
        line,
        column,
    }
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}

fn construct_for(open: u8) -> &'static str {
    match open {
        b'(' => "parenthesis",
        b'[' => "array literal",
        _ => "object literal",
    }
}

/// Skip a string or template literal starting at `start`
///
/// Returns the offset one past the closing quote.
pub fn skip_string(src: &str, start: usize) -> Result<usize> {
    let bytes = src.as_bytes();
    let quote = bytes[start];
    if quote == b'`' {
        return skip_template(src, start);
    }

    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                // Line continuation may use CRLF
                if bytes.get(pos + 1) == Some(&b'\r') && bytes.get(pos + 2) == Some(&b'\n') {
                    pos += 3;
                } else {
                    pos += 2;
                }
            }
            b'\n' => break,
            b if b == quote => return Ok(pos + 1),
            _ => pos += 1,
        }
    }
    Err(unterminated(src, "string literal", start))
}

fn skip_template(src: &str, start: usize) -> Result<usize> {
    let bytes = src.as_bytes();
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'`' => return Ok(pos + 1),
            b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                let scan = scan(src, pos + 2, false)?;
                if bytes.get(scan.terminator) != Some(&b'}') {
                    return Err(unterminated(src, "template substitution", pos));
                }
                pos = scan.terminator + 1;
            }
            _ => pos += 1,
        }
    }
    Err(unterminated(src, "template literal", start))
}

/// Whether a comment starts at `pos`
pub fn at_comment(src: &str, pos: usize) -> bool {
    let bytes = src.as_bytes();
    bytes.get(pos) == Some(&b'/') && matches!(bytes.get(pos + 1), Some(b'/') | Some(b'*'))
}

/// Skip a `//` or `/* */` comment starting at `start`
///
/// Line comments end before their line break.
pub fn skip_comment(src: &str, start: usize) -> Result<usize> {
    let bytes = src.as_bytes();
    if bytes.get(start + 1) == Some(&b'/') {
        return Ok(src[start..].find('\n').map_or(src.len(), |i| start + i));
    }
    match src[start + 2..].find("*/") {
        Some(i) => Ok(start + 2 + i + 2),
        None => Err(unterminated(src, "block comment", start)),
    }
}

/// Skip whitespace (including line breaks) and comments
pub fn skip_trivia(src: &str, mut pos: usize) -> Result<usize> {
    let bytes = src.as_bytes();
    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
        } else if at_comment(src, pos) {
            pos = skip_comment(src, pos)?;
        } else {
            break;
        }
    }
    Ok(pos)
}

/// Scan one value starting at `start`
///
/// The value ends at the first depth-zero `,` or `;`, or at a closing bracket
/// that was not opened inside the value.
pub fn scan_value(src: &str, start: usize) -> Result<ValueScan> {
    scan(src, start, true)
}

fn scan(src: &str, start: usize, stop_at_separators: bool) -> Result<ValueScan> {
    let bytes = src.as_bytes();
    // (expected closer, offset of opener)
    let mut stack: Vec<(u8, usize)> = Vec::new();
    let mut pos = start;
    let mut end = start;

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' | b'\'' | b'`' => {
                pos = skip_string(src, pos)?;
                end = pos;
            }
            b'/' if at_comment(src, pos) => {
                pos = skip_comment(src, pos)?;
            }
            open @ (b'(' | b'[' | b'{') => {
                stack.push((closer_for(open), pos));
                pos += 1;
                end = pos;
            }
            close @ (b')' | b']' | b'}') => match stack.pop() {
                Some((expected, _)) if expected == close => {
                    pos += 1;
                    end = pos;
                }
                Some((expected, _)) => {
                    let (line, column) = line_col(src, pos);
                    return Err(RfiError::Mismatched {
                        expected: expected as char,
                        found: close as char,
                        line,
                        column,
                    });
                }
                None => {
                    return Ok(ValueScan {
                        end,
                        terminator: pos,
                    })
                }
            },
            b',' | b';' if stop_at_separators && stack.is_empty() => {
                return Ok(ValueScan {
                    end,
                    terminator: pos,
                });
            }
            b if b.is_ascii_whitespace() => pos += 1,
            _ => {
                pos += 1;
                end = pos;
            }
        }
    }

    if let Some((_, opened)) = stack.pop() {
        return Err(unterminated(src, construct_for(bytes[opened]), opened));
    }
    Ok(ValueScan {
        end,
        terminator: bytes.len(),
    })
}
