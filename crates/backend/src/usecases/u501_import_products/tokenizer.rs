use anyhow::bail;

/// Tokenized CSV file: one header row plus at least one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Tokenize raw CSV text.
///
/// Lines are split on newlines, trimmed and dropped when blank; fewer than
/// two surviving lines (header + one data row) is an error. Fields are
/// comma-separated; a double quote toggles quoted state and a doubled quote
/// inside a quoted field is unescaped to a literal quote.
pub fn tokenize_csv(text: &str) -> anyhow::Result<RawTable> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        bail!("El archivo CSV debe tener una fila de encabezados y al menos una fila de datos");
    }

    let mut iter = lines.into_iter();
    let headers = tokenize_line(iter.next().expect("checked above"));
    let rows = iter.map(tokenize_line).collect();

    Ok(RawTable { headers, rows })
}

/// Split one line into fields, honoring quotes
fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // "" inside a quoted field is an escaped literal quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    fields.push(std::mem::take(&mut current).trim().to_string());
                }
                _ => current.push(c),
            }
        }
    }
    fields.push(current.trim().to_string());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields() {
        assert_eq!(tokenize_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_comma_stays_in_field() {
        assert_eq!(tokenize_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn doubled_quote_unescapes() {
        assert_eq!(
            tokenize_line(r#""he said ""hi""""#),
            vec![r#"he said "hi""#]
        );
    }

    #[test]
    fn trailing_empty_field_is_kept() {
        assert_eq!(tokenize_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(tokenize_line(" a , b ,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_lines_are_filtered() {
        let table = tokenize_csv("nombre,precio\n\n  \nempanada,100\n").unwrap();
        assert_eq!(table.headers, vec!["nombre", "precio"]);
        assert_eq!(table.rows, vec![vec!["empanada", "100"]]);
    }

    #[test]
    fn crlf_input_is_accepted() {
        let table = tokenize_csv("nombre,precio\r\nempanada,100\r\n").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], "100");
    }

    #[test]
    fn header_only_is_rejected() {
        assert!(tokenize_csv("nombre,precio\n").is_err());
        assert!(tokenize_csv("").is_err());
    }
}
