use std::collections::HashSet;

use strum::{EnumString, IntoStaticStr};

use crate::{
    common::error::{InferenceError, SchemaError, TypeMappingError},
    core::types::ColumnType,
    db::{
        source::{SourceColumn, TabularSource},
        table::{ColumnDefinition, TableSchema},
    },
};

/// Native type tags a tabular source may report, grouped by the column type
/// they map to.
///
/// Tag names follow numpy's scalar type names. Anything without an exact
/// numeric or boolean counterpart falls back to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum NativeType {
    #[strum(serialize = "bool", serialize = "bool8", serialize = "bool_")]
    Bool,

    #[strum(
        serialize = "int8",
        serialize = "int16",
        serialize = "int32",
        serialize = "int64",
        serialize = "int0",
        serialize = "int_",
        serialize = "intc",
        serialize = "intp",
        serialize = "short",
        serialize = "longlong",
        serialize = "uint8",
        serialize = "uint16",
        serialize = "uint32",
        serialize = "uint64",
        serialize = "uint",
        serialize = "uint0",
        serialize = "uintc",
        serialize = "uintp",
        serialize = "ubyte",
        serialize = "ushort",
        serialize = "ulonglong",
        serialize = "byte",
        serialize = "bytes0",
        serialize = "bytes_",
        serialize = "matrix"
    )]
    Int,

    #[strum(
        serialize = "float16",
        serialize = "float32",
        serialize = "float64",
        serialize = "float_",
        serialize = "half",
        serialize = "single",
        serialize = "double"
    )]
    Float,

    #[strum(to_string = "longdouble", serialize = "longfloat")]
    LongDouble,

    #[strum(
        serialize = "complex64",
        serialize = "complex128",
        serialize = "complex_",
        serialize = "csingle",
        serialize = "cfloat",
        serialize = "cdouble",
        serialize = "clongdouble",
        serialize = "clongfloat",
        serialize = "longcomplex",
        serialize = "singlecomplex"
    )]
    Complex,

    #[strum(serialize = "datetime64", serialize = "timedelta64")]
    Temporal,

    #[strum(
        serialize = "str",
        serialize = "str0",
        serialize = "str_",
        serialize = "string",
        serialize = "string_",
        serialize = "unicode_"
    )]
    Str,

    #[strum(
        serialize = "object",
        serialize = "record",
        serialize = "void",
        serialize = "void0"
    )]
    Object,
}

impl NativeType {
    /// Looks up a native tag. A unit suffix such as `[ns]` is ignored, so
    /// `datetime64[ns]` resolves like `datetime64`.
    pub fn from_tag(tag: &str) -> Result<Self, TypeMappingError> {
        let base = tag.split_once('[').map_or(tag, |(base, _)| base).trim();
        base.parse()
            .map_err(|_| TypeMappingError::UnsupportedNativeType(tag.to_owned()))
    }

    /// The column type stored for values of this native type.
    pub fn column_type(self) -> ColumnType {
        match self {
            NativeType::Bool => ColumnType::Boolean,
            NativeType::Int => ColumnType::Integer,
            NativeType::Float => ColumnType::Float,
            NativeType::LongDouble => ColumnType::Double,
            NativeType::Complex
            | NativeType::Temporal
            | NativeType::Str
            | NativeType::Object => ColumnType::Text,
        }
    }
}

/// Maps a native type tag straight to a column type.
pub fn map_native_type(tag: &str) -> Result<ColumnType, TypeMappingError> {
    NativeType::from_tag(tag).map(NativeType::column_type)
}

/// Infers column definitions for a list of source columns.
///
/// Primary keys are never guessed: a column is part of the key exactly when
/// its name is in `primary_key_names`. Column order is kept. The first
/// unmapped tag fails the whole inference.
pub fn infer_columns(
    columns: &[SourceColumn],
    primary_key_names: &[&str],
) -> Result<Vec<ColumnDefinition>, InferenceError> {
    if primary_key_names.is_empty() {
        return Err(SchemaError::NoPrimaryKey.into());
    }

    let unknown_keys: Vec<String> = primary_key_names
        .iter()
        .filter(|name| !columns.iter().any(|col| col.name == **name))
        .map(|name| (*name).to_owned())
        .collect();
    if !unknown_keys.is_empty() {
        return Err(SchemaError::ColumnMismatch {
            missing: unknown_keys,
            unexpected: Vec::new(),
        }
        .into());
    }

    let keys: HashSet<&str> = primary_key_names.iter().copied().collect();

    columns
        .iter()
        .map(|col| -> Result<ColumnDefinition, InferenceError> {
            let kind = map_native_type(&col.native_type)?;
            Ok(ColumnDefinition::new(
                &col.name,
                kind,
                keys.contains(col.name.as_str()),
            ))
        })
        .collect()
}

/// Builds a [`TableSchema`] from a tabular source's reported columns.
pub fn infer_schema<S: TabularSource>(
    table_name: &str,
    keyspace: Option<&str>,
    source: &S,
    primary_key_names: &[&str],
) -> Result<TableSchema, InferenceError> {
    let columns = infer_columns(source.columns(), primary_key_names)?;
    Ok(TableSchema::new(table_name, keyspace, columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::source::Frame;

    #[test]
    fn test_native_type_mapping() {
        assert_eq!(map_native_type("int64"), Ok(ColumnType::Integer));
        assert_eq!(map_native_type("int32"), Ok(ColumnType::Integer));
        assert_eq!(map_native_type("uint8"), Ok(ColumnType::Integer));
        assert_eq!(map_native_type("float64"), Ok(ColumnType::Float));
        assert_eq!(map_native_type("double"), Ok(ColumnType::Float));
        assert_eq!(map_native_type("longdouble"), Ok(ColumnType::Double));
        assert_eq!(map_native_type("bool"), Ok(ColumnType::Boolean));
        assert_eq!(map_native_type("bool_"), Ok(ColumnType::Boolean));
        assert_eq!(map_native_type("object"), Ok(ColumnType::Text));
        assert_eq!(map_native_type("complex128"), Ok(ColumnType::Text));
        assert_eq!(map_native_type("unicode_"), Ok(ColumnType::Text));
    }

    #[test]
    fn test_temporal_tag_with_unit() {
        assert_eq!(NativeType::from_tag("datetime64[ns]"), Ok(NativeType::Temporal));
        assert_eq!(map_native_type("timedelta64[s]"), Ok(ColumnType::Text));
    }

    #[test]
    fn test_unsupported_tag() {
        assert_eq!(
            map_native_type("category"),
            Err(TypeMappingError::UnsupportedNativeType("category".to_string()))
        );
    }

    #[test]
    fn test_native_type_name() {
        let name: &'static str = NativeType::LongDouble.into();
        assert_eq!(name, "longdouble");
    }

    #[test]
    fn test_infer_schema_keeps_order_and_keys() {
        let frame = Frame::new([
            ("id", "int64"),
            ("username", "object"),
            ("score", "float64"),
            ("active", "bool"),
        ]);

        let schema = infer_schema("User", Some("ks"), &frame, &["username", "id"]).unwrap();
        let rendered: Vec<String> = schema.columns().iter().map(|c| c.render()).collect();
        assert_eq!(
            rendered,
            vec!["id int", "username text", "score float", "active boolean"]
        );

        let keys: Vec<&str> = schema.primary_keys().map(|c| c.name.as_str()).collect();
        assert_eq!(keys, vec!["id", "username"]);
    }

    #[test]
    fn test_infer_schema_unsupported_halts() {
        let frame = Frame::new([("id", "int64"), ("tag", "category")]);
        let result = infer_schema("t", None, &frame, &["id"]);
        assert_eq!(
            result,
            Err(InferenceError::TypeMapping(
                TypeMappingError::UnsupportedNativeType("category".to_string())
            ))
        );
    }

    #[test]
    fn test_infer_schema_requires_primary_key() {
        let frame = Frame::new([("id", "int64")]);
        assert_eq!(
            infer_schema("t", None, &frame, &[]),
            Err(InferenceError::Schema(SchemaError::NoPrimaryKey))
        );
    }

    #[test]
    fn test_infer_schema_unknown_key_name() {
        let frame = Frame::new([("id", "int64")]);
        assert_eq!(
            infer_schema("t", None, &frame, &["uid"]),
            Err(InferenceError::Schema(SchemaError::ColumnMismatch {
                missing: vec!["uid".to_string()],
                unexpected: Vec::new(),
            }))
        );
    }
}
