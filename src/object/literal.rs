//! Collection literal splitting.
//!
//! Splits the textual body of `[…]` and `{k:v,…}` literals into element
//! strings, honoring quoting and nesting, without interpreting the elements —
//! scalar parsing stays with [`super::scalar`].

use crate::error::{Exception, Result};

/// Split a `[e1,e2,…]` literal into its trimmed element strings.
pub fn split_elements(literal: &str) -> Result<Vec<String>> {
    let inner = strip_delimiters(literal, '[', ']')?;
    split_top_level(inner)
}

/// Split a `{k1:v1,…}` literal into trimmed `(key, value)` string pairs.
pub fn split_entries(literal: &str) -> Result<Vec<(String, String)>> {
    let inner = strip_delimiters(literal, '{', '}')?;
    let mut entries = Vec::new();
    for item in split_top_level(inner)? {
        let colon = find_top_level_colon(&item).ok_or(Exception::InvalidArgument)?;
        let key = item[..colon].trim_end();
        let value = item[colon + 1..].trim_start();
        if key.is_empty() || value.is_empty() {
            return Err(Exception::InvalidArgument);
        }
        entries.push((key.to_string(), value.to_string()));
    }
    Ok(entries)
}

fn strip_delimiters(literal: &str, open: char, close: char) -> Result<&str> {
    let trimmed = literal.trim();
    trimmed
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
        .ok_or(Exception::InvalidArgument)
}

/// Split on commas outside quotes and brackets. An empty body yields no
/// items; an empty item (`[1,,2]`) is rejected.
fn split_top_level(inner: &str) -> Result<Vec<String>> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut items = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let bytes = inner.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'"' | b'\'' => {
                index = skip_quoted(bytes, index)?;
                continue;
            }
            b'[' | b'{' => depth += 1,
            b']' | b'}' => depth = depth.checked_sub(1).ok_or(Exception::InvalidArgument)?,
            b',' if depth == 0 => {
                items.push(trimmed_item(&inner[start..index])?);
                start = index + 1;
            }
            _ => {}
        }
        index += 1;
    }
    if depth != 0 {
        return Err(Exception::InvalidArgument);
    }
    items.push(trimmed_item(&inner[start..])?);
    Ok(items)
}

/// Offset of the first `:` outside quotes, skipping `::` pairs so namespaced
/// variable references inside values never split a key.
fn find_top_level_colon(item: &str) -> Option<usize> {
    let bytes = item.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'"' | b'\'' => index = skip_quoted(bytes, index).ok()?,
            b':' if index + 1 < bytes.len() && bytes[index + 1] == b':' => index += 2,
            b':' => return Some(index),
            _ => index += 1,
        }
    }
    None
}

fn trimmed_item(raw: &str) -> Result<String> {
    let item = raw.trim();
    if item.is_empty() {
        return Err(Exception::InvalidArgument);
    }
    Ok(item.to_string())
}

fn skip_quoted(bytes: &[u8], open: usize) -> Result<usize> {
    let delimiter = bytes[open];
    let mut index = open + 1;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => {
                if index + 1 >= bytes.len() {
                    return Err(Exception::InvalidArgument);
                }
                index += 2;
            }
            byte if byte == delimiter => return Ok(index + 1),
            _ => index += 1,
        }
    }
    Err(Exception::InvalidArgument)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_elements() {
        assert_eq!(split_elements("[1, 2, 3]").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(split_elements("[]").unwrap(), Vec::<String>::new());
        assert_eq!(split_elements("[ ]").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn quoted_elements_keep_commas_and_brackets() {
        assert_eq!(
            split_elements(r#"["a,b", "c]d"]"#).unwrap(),
            vec![r#""a,b""#, r#""c]d""#]
        );
        assert_eq!(split_elements("[',', 'x']").unwrap(), vec!["','", "'x'"]);
    }

    #[test]
    fn splits_dictionary_entries() {
        assert_eq!(
            split_entries(r#"{"a": 1, "b": 2}"#).unwrap(),
            vec![
                (r#""a""#.to_string(), "1".to_string()),
                (r#""b""#.to_string(), "2".to_string()),
            ]
        );
        assert_eq!(split_entries("{}").unwrap(), Vec::new());
    }

    #[test]
    fn entry_keys_may_quote_colons() {
        assert_eq!(
            split_entries(r#"{"a:b": 1}"#).unwrap(),
            vec![(r#""a:b""#.to_string(), "1".to_string())]
        );
        assert_eq!(
            split_entries("{':': 'v'}").unwrap(),
            vec![("':'".to_string(), "'v'".to_string())]
        );
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(split_elements("1,2").is_err());
        assert!(split_elements("[1,,2]").is_err());
        assert!(split_elements("[1,2").is_err());
        assert!(split_entries("{1}").is_err());
        assert!(split_entries("{:1}").is_err());
        assert!(split_entries("{k:}").is_err());
    }
}
