/// Splits one data line on commas, keeping commas inside single or double
/// quotes as part of the token. Quotes themselves are preserved; use
/// [`strip_surrounding_quotes`] on the tokens.
pub fn split_csv_preserving_quotes(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.trim_end_matches(['\r', '\n']).chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    current.push(c);
                }
                ',' => {
                    tokens.push(current.clone());
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }
    tokens.push(current);
    tokens
}

pub fn strip_surrounding_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 {
        let first = s.chars().next();
        let last = s.chars().last();
        if (first == Some('\'') && last == Some('\'')) || (first == Some('"') && last == Some('"'))
        {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_line() {
        assert_eq!(
            split_csv_preserving_quotes("265,470,18.7,23.5,220,CH"),
            vec!["265", "470", "18.7", "23.5", "220", "CH"]
        );
    }

    #[test]
    fn test_split_keeps_quoted_commas_together() {
        assert_eq!(
            split_csv_preserving_quotes("1,'a,b',2"),
            vec!["1", "'a,b'", "2"]
        );
        assert_eq!(
            split_csv_preserving_quotes("\"x,y\",z"),
            vec!["\"x,y\"", "z"]
        );
    }

    #[test]
    fn test_split_preserves_empty_tokens() {
        assert_eq!(split_csv_preserving_quotes("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_csv_preserving_quotes(""), vec![""]);
    }

    #[test]
    fn test_split_drops_trailing_newline_only() {
        assert_eq!(split_csv_preserving_quotes("a,b\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_strip_surrounding_quotes() {
        assert_eq!(strip_surrounding_quotes("'CH'"), "CH");
        assert_eq!(strip_surrounding_quotes("\"RT\""), "RT");
        assert_eq!(strip_surrounding_quotes("  SS  "), "SS");
        assert_eq!(strip_surrounding_quotes("'unterminated"), "'unterminated");
        assert_eq!(strip_surrounding_quotes("'"), "'");
    }
}
