//=========================================================================
// Navigation Arguments
//=========================================================================
//
// Name/value pairs handed to a destination when it is created or
// rebound. Arguments are owned values, so cloning them into the back
// stack detaches them from anything the caller does afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== ArgValue ============================================================

/// Value carried by an [`Argument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ArgValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

//=== Argument ============================================================

/// Immutable name/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    name: String,
    value: ArgValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ArgValue {
        &self.value
    }
}

//=== Arguments ===========================================================

/// Ordered argument list with unique names.
///
/// Setting a name that is already present replaces its value in place
/// (last write wins).
///
/// ```
/// use aetheric_navigation::core::navigation::Arguments;
///
/// let args = Arguments::new().with("tab", "audio").with("tab", "video");
/// assert_eq!(args.len(), 1);
/// assert_eq!(args.get("tab").and_then(|v| v.as_str()), Some("video"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments {
    items: Vec<Argument>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Arguments::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.set(Argument::new(name, value));
        self
    }

    pub fn set(&mut self, argument: Argument) {
        match self.items.iter_mut().find(|a| a.name == argument.name) {
            Some(existing) => existing.value = argument.value,
            None => self.items.push(argument),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.items.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.items.iter()
    }

    /// Returns `defaults` overlaid with `self`.
    ///
    /// Names present in both keep the position from `defaults` and the
    /// value from `self`.
    pub fn merged_over(&self, defaults: &Arguments) -> Arguments {
        let mut merged = defaults.clone();
        for argument in &self.items {
            merged.set(argument.clone());
        }
        merged
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        let mut arguments = Arguments::new();
        for argument in iter {
            arguments.set(argument);
        }
        arguments
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
