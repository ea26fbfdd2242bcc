//! Named sets of scalars and strings.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::errors::{argument_value, EvalError};
use crate::value::Value;

/// A set member.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SetElement {
    Number(Complex),
    Text(String),
}

/// Canonical bits: `-0.0` folds into `0.0`, every NaN into one pattern.
fn canonical(x: f64) -> u64 {
    if x == 0.0 {
        0
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

impl PartialEq for SetElement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SetElement::Number(a), SetElement::Number(b)) => {
                canonical(a.re) == canonical(b.re) && canonical(a.im) == canonical(b.im)
            }
            (SetElement::Text(a), SetElement::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for SetElement {}

impl Hash for SetElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            SetElement::Number(z) => {
                0u8.hash(state);
                canonical(z.re).hash(state);
                canonical(z.im).hash(state);
            }
            SetElement::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

/// Numbers sort before strings; numbers by real then imaginary part.
impl Ord for SetElement {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SetElement::Number(a), SetElement::Number(b)) => {
                let norm = |z: &Complex| {
                    Complex::new(
                        f64::from_bits(canonical(z.re)),
                        f64::from_bits(canonical(z.im)),
                    )
                };
                norm(a).total_cmp(&norm(b))
            }
            (SetElement::Number(_), SetElement::Text(_)) => Ordering::Less,
            (SetElement::Text(_), SetElement::Number(_)) => Ordering::Greater,
            (SetElement::Text(a), SetElement::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for SetElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SetElement {
    pub fn to_value(&self) -> Value {
        match self {
            SetElement::Number(z) => Value::Scalar(*z),
            SetElement::Text(s) => Value::string(s.clone()),
        }
    }
}

impl fmt::Display for SetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetElement::Number(z) => write!(f, "{z}"),
            SetElement::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Unique elements with a display name.
///
/// Unordered sets keep insertion order for display only; equality ignores
/// it. Ordered sets keep their elements sorted at all times.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "SetParts")]
pub struct SetValue {
    name: String,
    ordered: bool,
    elements: IndexSet<SetElement, FxBuildHasher>,
}

#[derive(Deserialize)]
struct SetParts {
    name: String,
    ordered: bool,
    elements: IndexSet<SetElement, FxBuildHasher>,
}

impl TryFrom<SetParts> for SetValue {
    type Error = EvalError;

    fn try_from(parts: SetParts) -> Result<Self, EvalError> {
        let sorted = parts
            .elements
            .iter()
            .zip(parts.elements.iter().skip(1))
            .all(|(a, b)| a < b);
        if parts.ordered && !sorted {
            return Err(argument_value(format!(
                "the sorted set {} holds its elements out of order",
                parts.name
            )));
        }
        Ok(SetValue {
            name: parts.name,
            ordered: parts.ordered,
            elements: parts.elements,
        })
    }
}

impl SetValue {
    pub fn new(name: impl Into<String>, ordered: bool) -> Self {
        SetValue {
            name: name.into(),
            ordered,
            elements: IndexSet::default(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: &SetElement) -> bool {
        self.elements.contains(element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetElement> {
        self.elements.iter()
    }

    /// Add one element; returns `false` for a duplicate.
    pub fn insert(&mut self, element: SetElement) -> bool {
        let added = self.elements.insert(element);
        if added && self.ordered {
            self.elements.sort();
        }
        added
    }

    /// Add a runtime value.
    ///
    /// Scalars and strings become one element each. Unordered sets also
    /// accept matrices, adding every element; ordered sets reject them.
    pub fn insert_value(&mut self, value: &Value) -> Result<(), EvalError> {
        if let Some(z) = value.as_scalar() {
            self.insert(SetElement::Number(z));
            return Ok(());
        }
        match value {
            Value::Str(s) => {
                self.insert(SetElement::Text(s.to_string()));
                Ok(())
            }
            Value::Matrix(m) if !self.ordered => {
                for &z in m.data() {
                    self.insert(SetElement::Number(z));
                }
                Ok(())
            }
            other => Err(argument_value(format!(
                "a {} value cannot be added to the {} set {}",
                other.kind(),
                if self.ordered { "sorted" } else { "unordered" },
                self.name
            ))),
        }
    }

    /// Elements of either set, named `(a+b)`.
    #[must_use]
    pub fn union(&self, other: &SetValue) -> SetValue {
        let mut result = SetValue::new(format!("({}+{})", self.name, other.name), self.ordered);
        for e in self.iter().chain(other.iter()) {
            result.insert(e.clone());
        }
        result
    }

    /// Elements of both sets, named `(a*b)`.
    #[must_use]
    pub fn intersect(&self, other: &SetValue) -> SetValue {
        let mut result = SetValue::new(format!("({}*{})", self.name, other.name), self.ordered);
        for e in self.iter().filter(|e| other.contains(e)) {
            result.insert(e.clone());
        }
        result
    }

    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> SetValue {
        self.name = name.into();
        self
    }

    /// Ordered copy with the same name and elements.
    #[must_use]
    pub fn sorted(&self) -> SetValue {
        let mut result = SetValue::new(self.name.clone(), true);
        for e in self.iter() {
            result.insert(e.clone());
        }
        result
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ordered == other.ordered
            && self.len() == other.len()
            && self.iter().all(|e| other.contains(e))
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.name)?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests;
