use std::{convert::Infallible, fmt, str::FromStr};

/// Column types understood by the statement builder.
///
/// Each variant renders to a fixed wire-type token used in `CREATE TABLE`.
/// The token is not checked for legality; a bad [`ColumnType::Custom`] token
/// only surfaces when the database rejects the generated statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// UTF-8 text, `text`.
    Text,

    /// UTF-8 text, `varchar`.
    Varchar,

    /// 32-bit signed integer, `int`.
    Integer,

    /// 32-bit floating point number, `float`.
    Float,

    /// 64-bit floating point number, `double`.
    Double,

    /// `boolean`.
    Boolean,

    /// Ordered collection, `list`.
    List,

    /// Key/value collection, `map`.
    Map,

    /// Unordered unique collection, `set`.
    Set,

    Uuid,

    Inet,

    /// Any caller-supplied wire type, rendered verbatim.
    Custom(String),
}

impl ColumnType {
    /// Returns the wire-type token for this column type.
    pub fn wire_type(&self) -> &str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Varchar => "varchar",
            ColumnType::Integer => "int",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Boolean => "boolean",
            ColumnType::List => "list",
            ColumnType::Map => "map",
            ColumnType::Set => "set",
            ColumnType::Uuid => "uuid",
            ColumnType::Inet => "inet",
            ColumnType::Custom(token) => token,
        }
    }

    /// Renders a column declaration, `"<column_name> <wire_type>"`.
    pub fn render(&self, column_name: &str) -> String {
        format!("{column_name} {}", self.wire_type())
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ColumnType::List | ColumnType::Map | ColumnType::Set)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_type())
    }
}

/// Parses a wire-type token. Unknown tokens become [`ColumnType::Custom`].
impl FromStr for ColumnType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column_type = match s {
            "text" => ColumnType::Text,
            "varchar" => ColumnType::Varchar,
            "int" => ColumnType::Integer,
            "float" => ColumnType::Float,
            "double" => ColumnType::Double,
            "boolean" => ColumnType::Boolean,
            "list" => ColumnType::List,
            "map" => ColumnType::Map,
            "set" => ColumnType::Set,
            "uuid" => ColumnType::Uuid,
            "inet" => ColumnType::Inet,
            other => ColumnType::Custom(other.to_owned()),
        };

        Ok(column_type)
    }
}

/// A value bound to a statement placeholder.
///
/// Scalars cover what a tabular source produces; collections map onto the
/// `list`, `set` and `map` column types.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    /// A 64-bit signed integer value.
    Integer(i64),

    /// A 64-bit floating point number.
    Float(f64),

    /// A UTF-8 text string.
    Text(String),

    /// A boolean value (true/false).
    Boolean(bool),

    List(Vec<Value>),

    Set(Vec<Value>),

    /// Key/value pairs in insertion order.
    Map(Vec<(Value, Value)>),

    /// Represents a NULL value (absence of data).
    ///
    /// Substituted for a column a row does not provide.
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Renders the value as a CQL literal.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(fl) => write!(f, "{fl:?}"),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::List(items) => {
                f.write_str("[")?;
                write_separated(f, items)?;
                f.write_str("]")
            }
            Value::Set(items) => {
                f.write_str("{")?;
                write_separated(f, items)?;
                f.write_str("}")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Null => write!(f, "NULL"),
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_type_tokens() {
        assert_eq!(ColumnType::Integer.wire_type(), "int");
        assert_eq!(ColumnType::Text.wire_type(), "text");
        assert_eq!(ColumnType::Boolean.wire_type(), "boolean");
        assert_eq!(
            ColumnType::Custom("frozen<tuple<int, text>>".into()).wire_type(),
            "frozen<tuple<int, text>>"
        );
    }

    #[test]
    fn test_render_column() {
        assert_eq!(ColumnType::Double.render("score"), "score double");
        assert_eq!(
            ColumnType::Custom("cassandra_data_type".into()).render("mydatatype"),
            "mydatatype cassandra_data_type"
        );
    }

    #[test]
    fn test_parse_wire_type() {
        assert_eq!("int".parse::<ColumnType>(), Ok(ColumnType::Integer));
        assert_eq!("inet".parse::<ColumnType>(), Ok(ColumnType::Inet));
        assert_eq!(
            "timestamp".parse::<ColumnType>(),
            Ok(ColumnType::Custom("timestamp".to_string()))
        );
    }

    #[test]
    fn test_value_literals() {
        assert_eq!(Value::Text("O'Brien".into()).to_string(), "'O''Brien'");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(
            Value::List(vec![Value::Integer(1), Value::Integer(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(Value::Set(vec!["a".into()]).to_string(), "{'a'}");
        assert_eq!(
            Value::Map(vec![("k".into(), Value::Boolean(true))]).to_string(),
            "{'k': true}"
        );
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }
}
