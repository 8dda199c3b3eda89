//! Typed path parameter conversion.
//!
//! # Responsibilities
//! - Map a converter name (`""`, `"str"`, `"int"`, ...) to a parse function
//! - Produce a typed [`ParamValue`] or a [`ConvertError`]
//!
//! # Design Decisions
//! - Converters live behind `Arc` and are compared by identity, so `""` and
//!   `"str"` are the same converter while a look-alike function is not
//! - The value type is a closed enum; new converters reuse its variants

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A converted path parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// Return the integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Str(_) => None,
        }
    }

    /// Return the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            ParamValue::Int(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

/// A segment could not be converted to the declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {input:?} with converter {converter:?}")]
pub struct ConvertError {
    pub converter: String,
    pub input: String,
}

/// Signature of a conversion function; `None` means the segment does not
/// match the declared type.
pub type ParseFn = fn(&str) -> Option<ParamValue>;

/// A named conversion function.
pub struct Converter {
    name: String,
    parse: ParseFn,
}

impl Converter {
    pub fn new(name: impl Into<String>, parse: ParseFn) -> Self {
        Self {
            name: name.into(),
            parse,
        }
    }

    /// Name the converter was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert one path segment.
    pub fn convert(&self, input: &str) -> Result<ParamValue, ConvertError> {
        (self.parse)(input).ok_or_else(|| ConvertError {
            converter: self.name.clone(),
            input: input.to_string(),
        })
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").field("name", &self.name).finish()
    }
}

fn str_conv(s: &str) -> Option<ParamValue> {
    Some(ParamValue::Str(s.to_string()))
}

fn int_conv(s: &str) -> Option<ParamValue> {
    s.parse::<i64>().ok().map(ParamValue::Int)
}

/// Registering a converter under a name that is already taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("converter {0:?} already registered")]
pub struct ConverterExists(pub String);

/// Name → converter table consulted while registering patterns.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<Converter>>,
}

impl ConverterRegistry {
    /// An empty registry. Patterns with any parameter will fail to register.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// The built-in converters: `""` and `"str"` (identity), `"int"` (base 10).
    pub fn with_builtins() -> Self {
        let str_conv = Arc::new(Converter::new("str", str_conv));
        let int_conv = Arc::new(Converter::new("int", int_conv));

        let mut converters = HashMap::new();
        converters.insert(String::new(), str_conv.clone());
        converters.insert("str".to_string(), str_conv);
        converters.insert("int".to_string(), int_conv);

        Self { converters }
    }

    /// Add an application converter. Existing names are never replaced.
    pub fn register(&mut self, name: &str, parse: ParseFn) -> Result<(), ConverterExists> {
        if self.converters.contains_key(name) {
            return Err(ConverterExists(name.to_string()));
        }
        self.converters
            .insert(name.to_string(), Arc::new(Converter::new(name, parse)));
        Ok(())
    }

    /// Find a converter by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<Converter>> {
        self.converters.get(name).cloned()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_converter() {
        let registry = ConverterRegistry::with_builtins();
        let int = registry.lookup("int").unwrap();

        assert_eq!(int.convert("123"), Ok(ParamValue::Int(123)));
        assert_eq!(int.convert("-7"), Ok(ParamValue::Int(-7)));

        let err = int.convert("one-two-three").unwrap_err();
        assert_eq!(err.converter, "int");
        assert_eq!(err.input, "one-two-three");
    }

    #[test]
    fn test_str_converter() {
        let registry = ConverterRegistry::with_builtins();
        let s = registry.lookup("str").unwrap();
        assert_eq!(
            s.convert("one-two-three"),
            Ok(ParamValue::Str("one-two-three".into()))
        );
    }

    #[test]
    fn test_empty_name_aliases_str() {
        let registry = ConverterRegistry::with_builtins();
        let empty = registry.lookup("").unwrap();
        let s = registry.lookup("str").unwrap();
        let int = registry.lookup("int").unwrap();

        assert!(Arc::ptr_eq(&empty, &s));
        assert!(!Arc::ptr_eq(&s, &int));
        assert!(registry.lookup("mem").is_none());
    }

    #[test]
    fn test_register_custom() {
        fn hex(s: &str) -> Option<ParamValue> {
            i64::from_str_radix(s, 16).ok().map(ParamValue::Int)
        }

        let mut registry = ConverterRegistry::with_builtins();
        registry.register("hex", hex).unwrap();
        assert_eq!(
            registry.lookup("hex").unwrap().convert("ff"),
            Ok(ParamValue::Int(255))
        );

        assert_eq!(
            registry.register("int", hex),
            Err(ConverterExists("int".into()))
        );
    }

    #[test]
    fn test_look_alike_is_a_distinct_converter() {
        fn decimal(s: &str) -> Option<ParamValue> {
            s.parse::<i64>().ok().map(ParamValue::Int)
        }

        let mut registry = ConverterRegistry::with_builtins();
        registry.register("int2", decimal).unwrap();

        let int = registry.lookup("int").unwrap();
        let int2 = registry.lookup("int2").unwrap();
        assert_eq!(int.convert("7"), int2.convert("7"));
        assert!(!Arc::ptr_eq(&int, &int2));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ParamValue::Int(42).to_string(), "42");
        assert_eq!(ParamValue::Str("x".into()).to_string(), "x");
        assert_eq!(ParamValue::Int(42).as_int(), Some(42));
        assert_eq!(ParamValue::Int(42).as_str(), None);
    }
}
