use crate::CameraError;
use std::fmt;

/// Value of a camera parameter.
///
/// Parameters are dynamically typed across a camera but each parameter keeps
/// one tag; legal-value enumerations share the tag of the current value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Int(v) => write!(f, "{v}"),
            ParameterValue::Float(v) => write!(f, "{v}"),
            ParameterValue::Bool(v) => write!(f, "{v}"),
            ParameterValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl ParameterValue {
    /// Name of this value's variant tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ParameterValue::Int(_) => "int",
            ParameterValue::Float(_) => "float",
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Str(_) => "str",
        }
    }

    /// Parse `text` into the same variant as `self`.
    ///
    /// Used when loading parameter files, where the stored text must come
    /// back as the tag the parameter already carries.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Parse` when `text` does not parse as this tag.
    pub fn parse_like(&self, text: &str) -> Result<ParameterValue, CameraError> {
        let text = text.trim();
        match self {
            ParameterValue::Int(_) => text
                .parse::<i64>()
                .map(ParameterValue::Int)
                .map_err(|e| CameraError::Parse(format!("'{text}' is not an integer: {e}"))),
            ParameterValue::Float(_) => text
                .parse::<f64>()
                .map(ParameterValue::Float)
                .map_err(|e| CameraError::Parse(format!("'{text}' is not a float: {e}"))),
            ParameterValue::Bool(_) => text
                .parse::<bool>()
                .map(ParameterValue::Bool)
                .map_err(|e| CameraError::Parse(format!("'{text}' is not a bool: {e}"))),
            ParameterValue::Str(_) => Ok(ParameterValue::Str(text.to_string())),
        }
    }
}

type Getter = Box<dyn Fn() -> ParameterValue + Send + Sync>;
type Setter = Box<dyn Fn(ParameterValue) -> Result<(), CameraError> + Send + Sync>;

/// A named camera parameter bound to a getter and an optional setter.
///
/// A parameter constructed without a setter is read-only. The legal-value
/// enumeration is fixed at construction; empty means unconstrained.
pub struct CameraParameter {
    name: String,
    getter: Getter,
    setter: Option<Setter>,
    legal_values: Vec<ParameterValue>,
}

impl CameraParameter {
    /// Create a read-only parameter.
    pub fn new(
        name: impl Into<String>,
        getter: impl Fn() -> ParameterValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            getter: Box::new(getter),
            setter: None,
            legal_values: Vec::new(),
        }
    }

    /// Create a writable parameter.
    pub fn writable(
        name: impl Into<String>,
        getter: impl Fn() -> ParameterValue + Send + Sync + 'static,
        setter: impl Fn(ParameterValue) -> Result<(), CameraError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            getter: Box::new(getter),
            setter: Some(Box::new(setter)),
            legal_values: Vec::new(),
        }
    }

    /// Attach a fixed enumeration of legal values.
    pub fn with_legal_values(mut self, values: Vec<ParameterValue>) -> Self {
        self.legal_values = values;
        self
    }

    /// User-friendly name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, read through the bound getter.
    pub fn value(&self) -> ParameterValue {
        (self.getter)()
    }

    /// Write a value through the bound setter.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::ReadOnly` when no setter was bound, or the
    /// setter's own error.
    pub fn set_value(&self, value: ParameterValue) -> Result<(), CameraError> {
        match &self.setter {
            Some(setter) => setter(value),
            None => Err(CameraError::ReadOnly(self.name.clone())),
        }
    }

    /// True iff no setter was bound at construction.
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }

    /// Fixed enumeration of legal values; empty means unconstrained.
    pub fn legal_values(&self) -> &[ParameterValue] {
        &self.legal_values
    }
}

impl fmt::Debug for CameraParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraParameter")
            .field("name", &self.name)
            .field("read_only", &self.is_read_only())
            .field("legal_values", &self.legal_values)
            .finish()
    }
}
