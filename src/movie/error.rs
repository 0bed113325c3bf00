//! Field-level validation diagnostics.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable classification of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A mandatory field was absent.
    Required,
    /// The value had the wrong JSON type.
    InvalidType,
    /// Below a minimum (numeric bound or empty string).
    TooSmall,
    /// Above a maximum.
    TooBig,
    /// Not one of the allowed enum values.
    InvalidEnumValue,
    /// A string that does not parse as a URL.
    InvalidUrl,
}

/// A single violation, scoped to the field (and array element) that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Offending field. `None` when the input itself is not an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Element position for issues inside an array field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub code: IssueCode,
    pub message: String,
    /// JSON type category of the offending value, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl ValidationIssue {
    pub fn new(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            index: None,
            code,
            message: message.into(),
            received: None,
        }
    }

    pub fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: None,
            index: None,
            code,
            message: message.into(),
            received: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn received(mut self, kind: &str) -> Self {
        self.received = Some(kind.to_string());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, self.index) {
            (Some(field), Some(index)) => write!(f, "{}[{}]: {}", field, index, self.message),
            (Some(field), None) => write!(f, "{}: {}", field, self.message),
            (None, _) => f.write_str(&self.message),
        }
    }
}

/// Every issue found in one input. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issues reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.field.as_deref() == Some(field))
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationIssue> for ValidationErrors {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid movie ({} issue", self.issues.len())?;
        if self.issues.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(")")?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}
