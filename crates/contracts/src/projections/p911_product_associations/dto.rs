use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::shared::store::StoreId;

/// Non-empty set of product items on one side of an association rule.
///
/// Items are kept ordered and deduplicated, so `{'B', 'A'}` and `A, B`
/// are the same set and display the same way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductSet(BTreeSet<String>);

impl ProductSet {
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Error returned when an item set string is malformed or holds no items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSetParseError {
    pub raw: String,
    pub reason: &'static str,
}

impl fmt::Display for ProductSetParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "product set '{}': {}", self.raw, self.reason)
    }
}

impl std::error::Error for ProductSetParseError {}

impl FromStr for ProductSet {
    type Err = ProductSetParseError;

    /// Accepts `frozenset({'A', 'B'})`, `{'A', 'B'}`, `A, B` and `A`.
    /// Commas inside `'...'` or `"..."` belong to the item.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ProductSetParseError {
            raw: s.to_string(),
            reason,
        };

        let mut body = s.trim();
        if let Some(inner) = body
            .strip_prefix("frozenset(")
            .and_then(|b| b.strip_suffix(')'))
        {
            body = inner.trim();
        }
        if let Some(inner) = body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
            body = inner;
        }

        let items: BTreeSet<String> = split_items(body).map_err(error)?.into_iter().collect();
        if items.is_empty() {
            return Err(error("contains no items"));
        }
        Ok(Self(items))
    }
}

/// Split a set body on commas outside quotes
fn split_items(body: &str) -> Result<Vec<String>, &'static str> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut closed = false;

    for c in body.chars() {
        match quote {
            Some(q) if c == q => {
                quote = None;
                closed = true;
            }
            Some(_) => current.push(c),
            None => match c {
                ',' => {
                    items.extend(take_item(&mut current, closed)?);
                    closed = false;
                }
                '\'' | '"' if !closed && current.trim().is_empty() => {
                    current.clear();
                    quote = Some(c);
                }
                _ if closed => {
                    if !c.is_whitespace() {
                        return Err("unexpected text after closing quote");
                    }
                }
                _ => current.push(c),
            },
        }
    }

    if quote.is_some() {
        return Err("unterminated quote");
    }
    items.extend(take_item(&mut current, closed)?);
    Ok(items)
}

fn take_item(current: &mut String, quoted: bool) -> Result<Option<String>, &'static str> {
    let item = std::mem::take(current);
    if quoted {
        if item.is_empty() {
            return Err("empty quoted item");
        }
        return Ok(Some(item));
    }
    let item = item.trim();
    Ok((!item.is_empty()).then(|| item.to_string()))
}

impl fmt::Display for ProductSet {
    /// `A, B`; items that would not read back as themselves are quoted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let needs_quotes = item.contains(',')
                || item.starts_with(['\'', '"'])
                || item.trim() != item;
            if !needs_quotes {
                f.write_str(item)?;
            } else if item.contains('\'') {
                write!(f, "\"{item}\"")?;
            } else {
                write!(f, "'{item}'")?;
            }
        }
        Ok(())
    }
}

// JSON array of items, so an item containing a comma stays one item
impl Serialize for ProductSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = BTreeSet::<String>::deserialize(deserializer)?;
        if items.is_empty() || items.iter().any(|item| item.is_empty()) {
            return Err(serde::de::Error::custom("product set needs non-empty items"));
        }
        Ok(Self(items))
    }
}

/// Product association rule mined per store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: ProductSet,
    pub consequent: ProductSet,
    /// 1.0 means independence, above 1.0 a positive association
    pub lift: f64,
    pub store: StoreId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frozenset_notation() {
        let set: ProductSet = "frozenset({'Dept_7', 'Dept_2'})".parse().unwrap();
        assert_eq!(set.items().collect::<Vec<_>>(), vec!["Dept_2", "Dept_7"]);
        assert_eq!(set.to_string(), "Dept_2, Dept_7");
    }

    #[test]
    fn test_parse_plain_forms_are_equal() {
        let a: ProductSet = "{\"milk\", \"bread\"}".parse().unwrap();
        let b: ProductSet = "bread, milk, bread".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b.len(), 2);

        let single: ProductSet = " eggs ".parse().unwrap();
        assert_eq!(single.to_string(), "eggs");
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!("".parse::<ProductSet>().is_err());
        assert!("frozenset({})".parse::<ProductSet>().is_err());
        assert!("{ , }".parse::<ProductSet>().is_err());
    }

    #[test]
    fn test_serde_uses_item_array() {
        let set: ProductSet = "frozenset({'b', 'a'})".parse().unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let back: ProductSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);

        assert!(serde_json::from_str::<ProductSet>("[]").is_err());
    }

    #[test]
    fn test_quoted_item_keeps_its_comma() {
        let set: ProductSet = "frozenset({'Milk, 2%', 'Bread'})".parse().unwrap();
        assert_eq!(set.items().collect::<Vec<_>>(), vec!["Bread", "Milk, 2%"]);

        let single: ProductSet = "frozenset({'Milk, 2%'})".parse().unwrap();
        assert_eq!(single.len(), 1);

        // display quotes the item, so it reads back as the same set
        assert_eq!(set.to_string(), "Bread, 'Milk, 2%'");
        assert_eq!(set.to_string().parse::<ProductSet>().unwrap(), set);

        let json = serde_json::to_string(&single).unwrap();
        assert_eq!(json, r#"["Milk, 2%"]"#);
        assert_eq!(serde_json::from_str::<ProductSet>(&json).unwrap(), single);
    }

    #[test]
    fn test_malformed_quoting_fails() {
        let err = "frozenset({'Milk, 2%})".parse::<ProductSet>().unwrap_err();
        assert_eq!(err.reason, "unterminated quote");
        assert!("{'a' b}".parse::<ProductSet>().is_err());
        assert!("{'', 'a'}".parse::<ProductSet>().is_err());
    }

    #[test]
    fn test_inner_apostrophe_is_literal() {
        let set: ProductSet = "O'Brien, milk".parse().unwrap();
        assert_eq!(set.items().collect::<Vec<_>>(), vec!["O'Brien", "milk"]);
    }
}
