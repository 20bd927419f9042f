//! Fältvisa uppdateringar av personer och relationer.
//!
//! Kolumnnamn jämförs mot en vitlista per tabell och värden binds alltid
//! som parametrar, så fritext med citattecken sparas som den skrevs.

use rusqlite::types::Value;
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::models::{Gender, PartialDate};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Bool,
    Date,
    Gender,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i64>),
    Bool(bool),
    Date(PartialDate),
    Gender(Option<Gender>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Integer(_) => FieldKind::Integer,
            Self::Bool(_) => FieldKind::Bool,
            Self::Date(_) => FieldKind::Date,
            Self::Gender(_) => FieldKind::Gender,
        }
    }

    fn to_sql_value(&self) -> Value {
        match self {
            Self::Text(Some(s)) => Value::Text(s.clone()),
            Self::Integer(Some(n)) => Value::Integer(*n),
            Self::Bool(b) => Value::Integer(i64::from(*b)),
            Self::Date(date) => date.to_canonical().map(Value::Text).unwrap_or(Value::Null),
            Self::Gender(Some(g)) => Value::Text(g.as_db_str().to_string()),
            Self::Text(None) | Self::Integer(None) | Self::Gender(None) => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub name: String,
    pub value: FieldValue,
}

impl FieldUpdate {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub updated_rows: usize,
    /// Fält som hoppades över (okänt namn eller fel typ)
    pub unsupported: Vec<String>,
}

pub const PERSON_FIELDS: &[(&str, FieldKind)] = &[
    ("page_number", FieldKind::Integer),
    ("page_from", FieldKind::Integer),
    ("page_to", FieldKind::Integer),
    ("first_names", FieldKind::Text),
    ("last_name", FieldKind::Text),
    ("gender", FieldKind::Gender),
    ("birth_date", FieldKind::Date),
    ("birth_place", FieldKind::Text),
    ("death_date", FieldKind::Date),
    ("death_place", FieldKind::Text),
    ("deceased", FieldKind::Bool),
    ("comments", FieldKind::Text),
];

pub const RELATIONSHIP_FIELDS: &[(&str, FieldKind)] = &[
    ("person_id_partner1", FieldKind::Integer),
    ("person_id_partner2", FieldKind::Integer),
    ("marriage_date", FieldKind::Date),
    ("marriage_place", FieldKind::Text),
    ("divorce_date", FieldKind::Date),
    ("divorce_place", FieldKind::Text),
    ("comments", FieldKind::Text),
];

/// Slå upp fälttypen för ett kolumnnamn
pub fn field_kind(allowed: &[(&str, FieldKind)], name: &str) -> Option<FieldKind> {
    allowed
        .iter()
        .find(|(column, _)| *column == name)
        .map(|(_, kind)| *kind)
}

/// Bygg och kör en UPDATE för de fält som stöds. Övriga rapporteras
/// i `UpdateReport::unsupported` och påverkar inte de andra fälten.
pub(crate) fn apply_updates(
    conn: &Connection,
    table: &str,
    id_column: &str,
    id: i64,
    allowed: &[(&str, FieldKind)],
    updates: &[FieldUpdate],
) -> AppResult<UpdateReport> {
    let mut report = UpdateReport::default();
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    for update in updates {
        match field_kind(allowed, &update.name) {
            Some(kind) if kind == update.value.kind() => {
                values.push(update.value.to_sql_value());
                assignments.push(format!("{} = ?{}", update.name, values.len()));
            }
            _ => {
                warn!("{}", AppError::UnsupportedField(update.name.clone()));
                report.unsupported.push(update.name.clone());
            }
        }
    }

    if assignments.is_empty() {
        return Ok(report);
    }

    values.push(Value::Integer(id));
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        table,
        assignments.join(", "),
        id_column,
        values.len()
    );
    debug!("{}", sql);

    report.updated_rows = conn.execute(&sql, rusqlite::params_from_iter(values))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_lookup() {
        assert_eq!(field_kind(PERSON_FIELDS, "deceased"), Some(FieldKind::Bool));
        assert_eq!(field_kind(PERSON_FIELDS, "shoe_size"), None);
        assert_eq!(field_kind(RELATIONSHIP_FIELDS, "first_names"), None);
    }
}
