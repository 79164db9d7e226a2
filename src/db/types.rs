//! MySQL value rendering.
//!
//! Result values travel to the client as plain text, so every column value is
//! rendered to a `String` here.
//!
//! # Architecture
//!
//! Rendering uses a two-phase approach:
//! 1. `TypeCategory` classifies column types into logical categories
//! 2. Per-category decoders extract the value and format it
//!
//! Floating point and JSON columns skip decoding entirely: the server's own
//! text is already the representation clients expect. Anything the typed
//! decoders cannot handle falls back to those raw bytes too.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

/// Text used for SQL NULL.
pub const NULL_TEXT: &str = "NULL";

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    Binary,
    Json,
    Date,
    Time,
    DateTime,
    Text,
}

/// Classify a MySQL type name into a logical category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    // Decimal/Numeric - check first as it overlaps with "numeric" in float checks
    if lower.contains("decimal") || lower.contains("numeric") {
        return TypeCategory::Decimal;
    }

    if lower == "bool" || lower == "boolean" {
        return TypeCategory::Boolean;
    }

    if lower.contains("int") || lower.contains("tiny") || lower == "year" {
        return TypeCategory::Integer;
    }

    if lower.contains("float") || lower.contains("double") || lower == "real" {
        return TypeCategory::Float;
    }

    if lower == "json" {
        return TypeCategory::Json;
    }

    if lower.contains("blob") || lower.contains("binary") || lower == "bit" {
        return TypeCategory::Binary;
    }

    match lower.as_str() {
        "date" => TypeCategory::Date,
        "time" => TypeCategory::Time,
        "datetime" | "timestamp" => TypeCategory::DateTime,
        // varchar, char, text, enum, set, ...
        _ => TypeCategory::Text,
    }
}

// =============================================================================
// Decimal Type Support
// =============================================================================

/// Wrapper type for raw DECIMAL/NUMERIC values as strings.
/// This preserves the exact database representation.
#[derive(Debug)]
pub struct RawDecimal(pub String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

// =============================================================================
// Binary Encoding
// =============================================================================

/// Render binary data as UTF-8 text when valid, base64 otherwise.
pub fn render_binary(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => STANDARD.encode(bytes),
    }
}

// =============================================================================
// Row to Text Trait
// =============================================================================

/// Trait for converting database rows to rendered text values.
pub trait RowToText {
    /// Column names in result order.
    fn column_names(&self) -> Vec<String>;
    /// Every column value rendered as text, in column order.
    fn to_text_values(&self) -> Vec<String>;
}

impl RowToText for MySqlRow {
    fn column_names(&self) -> Vec<String> {
        self.columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect()
    }

    fn to_text_values(&self) -> Vec<String> {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let category = categorize_type(col.type_info().name());
                decode::render_column(self, idx, category)
            })
            .collect()
    }
}

// =============================================================================
// Per-Category Decoders
// =============================================================================

mod decode {
    use super::*;

    pub fn render_column(row: &MySqlRow, idx: usize, category: TypeCategory) -> String {
        if is_null(row, idx) {
            return NULL_TEXT.to_string();
        }

        let rendered = match category {
            TypeCategory::Decimal => decode_decimal(row, idx),
            TypeCategory::Integer => decode_integer(row, idx),
            TypeCategory::Boolean => decode_boolean(row, idx),
            TypeCategory::Float | TypeCategory::Json => decode_raw(row, idx),
            TypeCategory::Binary => decode_binary(row, idx),
            TypeCategory::Date => decode_typed::<NaiveDate>(row, idx),
            TypeCategory::Time => decode_typed::<NaiveTime>(row, idx),
            TypeCategory::DateTime => decode_typed::<NaiveDateTime>(row, idx),
            TypeCategory::Text => decode_typed::<String>(row, idx),
        };

        rendered
            .or_else(|| decode_raw(row, idx))
            .unwrap_or_else(|| {
                tracing::warn!(column = idx, ?category, "Failed to render column value");
                String::new()
            })
    }

    fn is_null(row: &MySqlRow, idx: usize) -> bool {
        row.try_get_raw(idx)
            .map(|value| sqlx::ValueRef::is_null(&value))
            .unwrap_or(false)
    }

    fn decode_typed<T>(row: &MySqlRow, idx: usize) -> Option<String>
    where
        T: for<'r> Decode<'r, sqlx::MySql> + Type<sqlx::MySql> + ToString,
    {
        row.try_get::<Option<T>, _>(idx)
            .ok()
            .flatten()
            .map(|v| v.to_string())
    }

    fn decode_decimal(row: &MySqlRow, idx: usize) -> Option<String> {
        match row.try_get::<Option<RawDecimal>, _>(idx) {
            Ok(v) => v.map(|d| d.0),
            Err(e) => {
                tracing::error!("Failed to decode DECIMAL: {:?}", e);
                None
            }
        }
    }

    fn decode_integer(row: &MySqlRow, idx: usize) -> Option<String> {
        // Try signed types
        if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
            return Some(v.to_string());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
            return Some(v.to_string());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
            return Some(v.to_string());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
            return Some(v.to_string());
        }
        // Try unsigned types
        if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
            return Some(v.to_string());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
            return Some(v.to_string());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
            return Some(v.to_string());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
            return Some(v.to_string());
        }
        None
    }

    fn decode_boolean(row: &MySqlRow, idx: usize) -> Option<String> {
        // TINYINT(1) carries 0/1; keep the server's numeric form.
        row.try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map(|b| if b { "1" } else { "0" }.to_string())
    }

    fn decode_binary(row: &MySqlRow, idx: usize) -> Option<String> {
        row.try_get::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| render_binary(&v))
    }

    /// The bytes exactly as the server sent them.
    fn decode_raw(row: &MySqlRow, idx: usize) -> Option<String> {
        row.try_get_unchecked::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| render_binary(&v))
    }
}
