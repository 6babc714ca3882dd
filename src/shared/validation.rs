use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

use crate::core::error::{AppError, Result};

/// Longest name accepted for categories and items
pub const MAX_NAME_LENGTH: usize = 255;

/// Reject blank or oversized names before they reach the database
pub fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} may not be blank", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "{} may not exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Required text field, trimmed of surrounding whitespace.
/// JSON numbers are taken as their text form; other non-strings are rejected.
pub fn trimmed<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string, got {}",
            other
        ))),
    }
}

/// Optional string field for partial updates; use with `#[serde(default)]`.
/// An explicit `null` is an error, absence is `None`.
pub fn trimmed_some<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    trimmed(deserializer).map(Some)
}

/// Foreign key as clients send it: a JSON integer or a numeric string.
/// `null` and blank strings mean "no reference".
pub fn reference<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid reference '{}'", n))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid reference '{}'", s))),
        other => Err(de::Error::custom(format!(
            "expected a primary key, got {}",
            other
        ))),
    }
}

/// Partial-update flavour of [`reference`]; use with `#[serde(default)]` so
/// that an absent field stays `None` while a blank one becomes `Some(None)`.
pub fn patch_reference<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    reference(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Write {
        #[serde(deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "reference")]
        category: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "trimmed_some")]
        name: Option<String>,
        #[serde(default, deserialize_with = "patch_reference")]
        category: Option<Option<i64>>,
    }

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> serde_json::Result<T> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_reference_accepts_numbers_and_numeric_strings() {
        let w: Write = parse(r#"{"name":" りんご ","category":7}"#).unwrap();
        assert_eq!(w.name, "りんご");
        assert_eq!(w.category, Some(7));

        let w: Write = parse(r#"{"name":"a","category":" 12 "}"#).unwrap();
        assert_eq!(w.category, Some(12));
    }

    #[test]
    fn test_reference_blank_null_and_missing_are_none() {
        let w: Write = parse(r#"{"name":"a","category":""}"#).unwrap();
        assert_eq!(w.category, None);
        let w: Write = parse(r#"{"name":"a","category":null}"#).unwrap();
        assert_eq!(w.category, None);
        let w: Write = parse(r#"{"name":"a"}"#).unwrap();
        assert_eq!(w.category, None);
    }

    #[test]
    fn test_reference_rejects_garbage() {
        assert!(parse::<Write>(r#"{"name":"a","category":"abc"}"#).is_err());
        assert!(parse::<Write>(r#"{"name":"a","category":1.5}"#).is_err());
        assert!(parse::<Write>(r#"{"name":"a","category":[1]}"#).is_err());
    }

    #[test]
    fn test_numbers_are_accepted_as_text() {
        let w: Write = parse(r#"{"name":123}"#).unwrap();
        assert_eq!(w.name, "123");
        let p: Patch = parse(r#"{"name":-1.5}"#).unwrap();
        assert_eq!(p.name.as_deref(), Some("-1.5"));

        assert!(parse::<Write>(r#"{"name":true}"#).is_err());
        assert!(parse::<Write>(r#"{"name":{"a":1}}"#).is_err());
    }

    #[test]
    fn test_missing_required_name_is_an_error() {
        assert!(parse::<Write>(r#"{"category":1}"#).is_err());
    }

    #[test]
    fn test_patch_distinguishes_absent_from_blank() {
        let p: Patch = parse("{}").unwrap();
        assert_eq!(p.name, None);
        assert_eq!(p.category, None);

        let p: Patch = parse(r#"{"category":""}"#).unwrap();
        assert_eq!(p.category, Some(None));

        let p: Patch = parse(r#"{"name":"  野菜"}"#).unwrap();
        assert_eq!(p.name.as_deref(), Some("野菜"));

        assert!(parse::<Patch>(r#"{"name":null}"#).is_err());
    }

    #[test]
    fn test_require_name() {
        assert!(require_name("item_name", "りんご").is_ok());
        assert!(matches!(
            require_name("item_name", "   "),
            Err(AppError::Validation(_))
        ));
        let long = "あ".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            require_name("item_name", &long),
            Err(AppError::Validation(_))
        ));
        assert!(require_name("item_name", &"あ".repeat(MAX_NAME_LENGTH)).is_ok());
    }
}
