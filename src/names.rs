//! Name lists for collect mode.
//!
//! Accepts plain text or CSV exported from a spreadsheet: the first field of
//! each row is the filename, the first row is a header unless told otherwise,
//! blank rows are skipped. A quoted first field (`"a, b.png",...`) keeps its
//! commas and `""` escapes. Rows are split on line breaks first, so a quoted
//! field that spans several lines is not supported.

use std::fs;
use std::io;
use std::path::Path;

use crate::fs_ops::io_error_with_help;

fn first_field(line: &str) -> String {
    let line = line.trim_start();
    let Some(rest) = line.strip_prefix('"') else {
        return line.split(',').next().unwrap_or_default().trim().to_string();
    };

    let mut out = String::new();
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                out.push('"');
                chars.next();
            } else {
                break;
            }
        } else {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Extract filenames from the text of a name list.
pub fn parse_name_list(content: &str, has_header: bool) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .skip(usize::from(has_header))
        .map(first_field)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Read and parse a name list file.
pub fn read_name_list(path: &Path, has_header: bool) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(io_error_with_help("read name list", path))?;
    Ok(parse_name_list(&content, has_header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_blank_rows_are_skipped() {
        let csv = "Image,Caption\n1.png,first\n\n  ,\n2.png\n";
        assert_eq!(parse_name_list(csv, true), vec!["1.png", "2.png"]);
    }

    #[test]
    fn without_header_first_row_counts() {
        assert_eq!(parse_name_list("a.png\r\nb.png\r\n", false), vec!["a.png", "b.png"]);
    }

    #[test]
    fn quoted_first_field_keeps_commas() {
        let csv = "name\n\"odd, name.png\",x\n\"say \"\"hi\"\".png\"\n";
        assert_eq!(
            parse_name_list(csv, true),
            vec!["odd, name.png", "say \"hi\".png"]
        );
    }

    #[test]
    fn bom_is_ignored() {
        assert_eq!(parse_name_list("\u{feff}x.png\n", false), vec!["x.png"]);
    }
}
