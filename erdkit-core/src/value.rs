//! Plain runtime values used as field defaults and `Literal` members.

use indexmap::IndexMap;

/// A plain value, as it would appear as a field default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Dict(IndexMap<String, Value>),
}

impl Value {
    /// Name of the value's type, as reported in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    /// Python-style `repr()` of the value.
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => repr_float(*f),
            Value::Str(s) => repr_str(s),
            Value::List(items) => {
                let items: Vec<_> = items.iter().map(Value::repr).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Dict(entries) => {
                let entries: Vec<_> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", repr_str(k), v.repr()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }
}

impl From<&toml::Value> for Value {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::Str(s.clone()),
            toml::Value::Integer(i) => Value::Int(*i),
            toml::Value::Float(f) => Value::Float(*f),
            toml::Value::Boolean(b) => Value::Bool(*b),
            toml::Value::Datetime(dt) => Value::Str(dt.to_string()),
            toml::Value::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            toml::Value::Table(table) => Value::Dict(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn repr_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        // Debug keeps the fractional part ("1.0", not "1")
        let repr = format!("{:?}", f);
        match repr.split_once('e') {
            // Python writes the exponent signed and at least two digits wide
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => repr,
        }
    }
}

/// Quote a string the way Python's `repr` does.
pub(crate) fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_repr() {
        assert_eq!(Value::None.repr(), "None");
        assert_eq!(Value::Bool(true).repr(), "True");
        assert_eq!(Value::Bool(false).repr(), "False");
        assert_eq!(Value::Int(0).repr(), "0");
        assert_eq!(Value::Int(-42).repr(), "-42");
        assert_eq!(Value::Float(1.0).repr(), "1.0");
        assert_eq!(Value::Float(2.5).repr(), "2.5");
        assert_eq!(Value::Float(f64::INFINITY).repr(), "inf");
    }

    #[test]
    fn test_float_exponent_repr() {
        assert_eq!(Value::Float(1e20).repr(), "1e+20");
        assert_eq!(Value::Float(1e-7).repr(), "1e-07");
        assert_eq!(Value::Float(-2.5e-10).repr(), "-2.5e-10");
        assert_eq!(Value::Float(1.5e300).repr(), "1.5e+300");
    }

    #[test]
    fn test_string_repr() {
        assert_eq!(Value::Str("hi".into()).repr(), "'hi'");
        assert_eq!(Value::Str(String::new()).repr(), "''");
        assert_eq!(Value::Str("it's".into()).repr(), "\"it's\"");
        assert_eq!(Value::Str("a\nb".into()).repr(), "'a\\nb'");
        assert_eq!(Value::Str("both ' \"".into()).repr(), "'both \\' \"'");
    }

    #[test]
    fn test_container_repr() {
        let list = Value::List(vec![Value::Int(1), Value::Str("a".into())]);
        assert_eq!(list.repr(), "[1, 'a']");

        let mut entries = IndexMap::new();
        entries.insert("a".to_string(), Value::Int(1));
        entries.insert("b".to_string(), Value::List(vec![]));
        assert_eq!(Value::Dict(entries).repr(), "{'a': 1, 'b': []}");
    }

    #[test]
    fn test_from_toml() {
        let value: toml::Value = toml::from_str::<toml::Table>("x = [1, 2.5, true]")
            .unwrap()
            .remove("x")
            .unwrap();
        assert_eq!(
            Value::from(&value),
            Value::List(vec![Value::Int(1), Value::Float(2.5), Value::Bool(true)])
        );
    }
}
