use regex::Regex;
use std::sync::OnceLock;

/// Tables owned by this service, longest first so that `good_category`
/// wins over `good` when matching constraint name prefixes.
const KNOWN_TABLES: &[&str] = &["good_category", "category", "users", "good"];

/// Constraint suffixes Postgres generates by default.
const CONSTRAINT_SUFFIXES: &[&str] = &["_pkey", "_key", "_fkey", "_check"];

struct Patterns {
    key_value: Regex,
    column: Regex,
    relation: Regex,
    referenced_table: Regex,
}

/// Extracts structured information from PostgreSQL constraint violations.
///
/// Postgres reports the violated constraint by name and puts the offending
/// values in the `DETAIL` line, e.g. `Key (email)=(a@b.c) already exists.`
pub struct ConstraintParser;

impl ConstraintParser {
    fn patterns() -> &'static Patterns {
        static PATTERNS: OnceLock<Patterns> = OnceLock::new();
        PATTERNS.get_or_init(|| Patterns {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value regex"),
            column: Regex::new(r#"column "([^"]+)""#).expect("valid column regex"),
            relation: Regex::new(r#"(?:relation|table) "([^"]+)""#).expect("valid relation regex"),
            referenced_table: Regex::new(r#"not present in table "([^"]+)""#)
                .expect("valid referenced table regex"),
        })
    }

    /// Returns `(entity, field, value)` for a unique or primary key violation.
    ///
    /// ```
    /// use catalog_rs::error::ConstraintParser;
    ///
    /// let parsed = ConstraintParser::parse_unique_violation(
    ///     "duplicate key value violates unique constraint \"users_email_key\"",
    ///     Some("Key (email)=(a@b.c) already exists."),
    ///     Some("users_email_key"),
    /// );
    /// assert_eq!(
    ///     parsed,
    ///     Some(("users".to_string(), "email".to_string(), "a@b.c".to_string()))
    /// );
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = details
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, v)| v)
                .unwrap_or_else(|| "unknown".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity = Self::extract_relation(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Returns `(referenced_entity, field, value)` for a foreign key violation.
    ///
    /// The entity is the table the key points at, which is the resource the
    /// caller asked for and that does not exist.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let text = details.unwrap_or(message);
        let (field, value) = Self::extract_key_value(text)
            .or_else(|| Self::extract_key_value(message))?;

        let entity = Self::patterns()
            .referenced_table
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .or_else(|| {
                constraint_name
                    .and_then(Self::parse_constraint_name)
                    .map(|(_, column)| column.trim_end_matches("_id").to_string())
            })
            .unwrap_or_else(|| "resource".to_string());

        Some((entity, field, value))
    }

    /// Returns `(entity, field)` for a not-null violation.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = Self::patterns()
            .column
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())?;
        let entity = Self::extract_relation(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a default Postgres constraint name into `(table, columns)`.
    ///
    /// `users_email_key` gives `("users", "email")`; `good_category_pkey`
    /// gives `("good_category", "good_id, category_id")`.
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        if constraint_name == "good_category_pkey" {
            return Some((
                "good_category".to_string(),
                "good_id, category_id".to_string(),
            ));
        }

        let body = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let table = KNOWN_TABLES
            .iter()
            .find(|t| body.starts_with(&format!("{t}_")))?;
        let column = &body[table.len() + 1..];
        if column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    fn extract_key_value(text: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(text).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    fn extract_relation(message: &str) -> Option<String> {
        Self::patterns()
            .relation
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}
