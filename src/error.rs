//! Error types for conversion operations.

use std::fmt;

/// Debugging context attached to an error: which element failed, where,
/// and inside what parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The offending element (a type name or a short rendition of it).
    pub element: Option<String>,
    /// Position of the element: byte offset for text inputs, element index
    /// for JSON inputs.
    pub position: Option<usize>,
    /// The parent element kind the failure occurred under.
    pub parent: Option<String>,
}

impl ErrorContext {
    pub fn is_empty(&self) -> bool {
        self.element.is_none() && self.position.is_none() && self.parent.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(element) = &self.element {
            parts.push(format!("element={element}"));
        }
        if let Some(position) = self.position {
            parts.push(format!("position={position}"));
        }
        if let Some(parent) = &self.parent {
            parts.push(format!("parent={parent}"));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Errors that can occur while converting between formats.
///
/// No partial AST is ever returned alongside one of these; an error means
/// the operation produced nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Malformed input that cannot be mapped to the AST (unknown Rich Text
    /// element type, unterminated fence, unrecognized broadcast range).
    Parse {
        message: String,
        context: ErrorContext,
    },
    /// An AST that violates a structural invariant of the target format
    /// (e.g. a link with an empty URL).
    Render {
        message: String,
        context: ErrorContext,
    },
    /// Caller-supplied data rejected at the API boundary (bad JSON shape,
    /// non-string mapping values, unsupported format direction).
    Validation {
        message: String,
        context: ErrorContext,
    },
    /// A visitor or callback failed or produced an invalid replacement.
    Transform {
        message: String,
        context: ErrorContext,
    },
}

impl ConvertError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConvertError::Parse {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        ConvertError::Render {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ConvertError::Validation {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn transform(message: impl Into<String>) -> Self {
        ConvertError::Transform {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.context_mut().element = Some(element.into());
        self
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.context_mut().position = Some(position);
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.context_mut().parent = Some(parent.into());
        self
    }

    pub fn message(&self) -> &str {
        match self {
            ConvertError::Parse { message, .. }
            | ConvertError::Render { message, .. }
            | ConvertError::Validation { message, .. }
            | ConvertError::Transform { message, .. } => message,
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            ConvertError::Parse { context, .. }
            | ConvertError::Render { context, .. }
            | ConvertError::Validation { context, .. }
            | ConvertError::Transform { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            ConvertError::Parse { context, .. }
            | ConvertError::Render { context, .. }
            | ConvertError::Validation { context, .. }
            | ConvertError::Transform { context, .. } => context,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ConvertError::Parse { .. } => "Parse error",
            ConvertError::Render { .. } => "Render error",
            ConvertError::Validation { .. } => "Validation error",
            ConvertError::Transform { .. } => "Transform error",
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = self.context();
        if context.is_empty() {
            write!(f, "{}: {}", self.kind(), self.message())
        } else {
            write!(f, "{}: {} (context: {context})", self.kind(), self.message())
        }
    }
}

impl std::error::Error for ConvertError {}
