/// Clean up a docstring the way Python's `inspect.cleandoc` does.
///
/// Tabs are expanded, leading whitespace of the first line is removed, the
/// common indentation of the remaining lines is removed, and blank lines at
/// either end are dropped.
pub fn cleandoc(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let mut lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start();
    }
    for line in lines.iter_mut().skip(1) {
        let cut = line
            .char_indices()
            .take_while(|(_, c)| c.is_whitespace())
            .nth(margin)
            .map_or(line.len() - line.trim_start().len(), |(i, _)| i);
        *line = &line[cut..];
    }

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());

    lines[start..].join("\n")
}

/// Leading whitespace, counted in chars.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn expand_tabs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut column = 0;
    for c in s.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleandoc_removes_common_indent() {
        let doc = "\n    Summary line.\n\n    Details\n      nested.\n    ";
        assert_eq!(cleandoc(doc), "Summary line.\n\nDetails\n  nested.");
    }

    #[test]
    fn test_cleandoc_first_line_not_counted_for_margin() {
        assert_eq!(cleandoc("Summary.\n    Body."), "Summary.\nBody.");
        assert_eq!(cleandoc("   One line.   "), "One line.   ");
    }

    #[test]
    fn test_cleandoc_tabs_and_blank() {
        assert_eq!(cleandoc("\n\tTabbed.\n\tAgain."), "Tabbed.\nAgain.");
        assert_eq!(cleandoc("   \n  \n"), "");
        assert_eq!(cleandoc(""), "");
    }

    #[test]
    fn test_cleandoc_multibyte_indent() {
        assert_eq!(cleandoc("Summary.\n x\n\u{a0}y"), "Summary.\nx\ny");
        assert_eq!(
            cleandoc("Summary.\n x\n\u{a0}\u{a0}y"),
            "Summary.\nx\n\u{a0}y"
        );
    }
}
