//! Typed field access over a parsed TOML table
//!
//! All schema checks go through here so every failure carries the section
//! and field it came from.

use super::enums::ConfigEnum;
use crate::error::{ConfigError, FieldPath};
use toml::{Table, Value};

/// Integer types a configuration value may be narrowed into
pub trait Bounded: TryFrom<i64> {
    const MIN: i64;
    const MAX: i64;
}

impl Bounded for u8 {
    const MIN: i64 = u8::MIN as i64;
    const MAX: i64 = u8::MAX as i64;
}

impl Bounded for u32 {
    const MIN: i64 = u32::MIN as i64;
    const MAX: i64 = u32::MAX as i64;
}

/// Look up a required top-level table
pub fn section<'a>(root: &'a Table, name: &'static str) -> Result<SectionReader<'a>, ConfigError> {
    let path = FieldPath::section(name);

    match root.get(name) {
        Some(Value::Table(table)) => Ok(SectionReader {
            section: name,
            table,
        }),
        Some(other) => Err(ConfigError::TypeMismatch {
            path,
            expected: "table",
            found: other.type_str(),
        }),
        None => Err(ConfigError::MissingField { path }),
    }
}

/// Look up an optional top-level enum value, e.g. `log_level`
pub fn optional_root_enum<E: ConfigEnum>(
    root: &Table,
    name: &'static str,
) -> Result<Option<E>, ConfigError> {
    root.get(name)
        .map(|value| enumeration(FieldPath::section(name), value))
        .transpose()
}

/// Reader for the fields of one section
#[derive(Debug, Clone, Copy)]
pub struct SectionReader<'a> {
    section: &'static str,
    table: &'a Table,
}

impl<'a> SectionReader<'a> {
    fn path(&self, field: &'static str) -> FieldPath {
        FieldPath::field(self.section, field)
    }

    fn required(&self, field: &'static str) -> Result<&'a Value, ConfigError> {
        self.table.get(field).ok_or(ConfigError::MissingField {
            path: self.path(field),
        })
    }

    pub fn string(&self, field: &'static str) -> Result<String, ConfigError> {
        let path = self.path(field);
        match self.required(field)? {
            Value::String(value) => Ok(value.clone()),
            other => Err(mismatch(path, "string", other)),
        }
    }

    pub fn integer<T: Bounded>(&self, field: &'static str) -> Result<T, ConfigError> {
        narrow(self.path(field), self.required(field)?)
    }

    /// Ordered integer array; element order is preserved as written
    pub fn integer_list<T: Bounded>(&self, field: &'static str) -> Result<Vec<T>, ConfigError> {
        let path = self.path(field);
        match self.required(field)? {
            Value::Array(items) => items.iter().map(|item| narrow(path, item)).collect(),
            other => Err(mismatch(path, "array of integers", other)),
        }
    }

    pub fn enumeration<E: ConfigEnum>(&self, field: &'static str) -> Result<E, ConfigError> {
        enumeration(self.path(field), self.required(field)?)
    }

    pub fn optional_enumeration<E: ConfigEnum>(
        &self,
        field: &'static str,
    ) -> Result<Option<E>, ConfigError> {
        self.table
            .get(field)
            .map(|value| enumeration(self.path(field), value))
            .transpose()
    }
}

fn mismatch(path: FieldPath, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        path,
        expected,
        found: found.type_str(),
    }
}

fn narrow<T: Bounded>(path: FieldPath, value: &Value) -> Result<T, ConfigError> {
    let Value::Integer(raw) = value else {
        return Err(mismatch(path, "integer", value));
    };

    T::try_from(*raw).map_err(|_| ConfigError::OutOfRange {
        path,
        value: *raw,
        min: T::MIN,
        max: T::MAX,
    })
}

fn enumeration<E: ConfigEnum>(path: FieldPath, value: &Value) -> Result<E, ConfigError> {
    let Value::String(literal) = value else {
        return Err(mismatch(path, "string", value));
    };

    E::from_literal(literal).ok_or_else(|| ConfigError::InvalidEnumValue {
        path,
        value: literal.clone(),
        allowed: E::LITERALS,
    })
}
