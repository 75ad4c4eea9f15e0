use serde::{Serialize, Serializer};

/// Why an operation failed. Only used to pick a response status; the
/// serialized envelope carries the messages alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
}

/// Result of every record operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success { message: String },
    Failure { kind: FailureKind, errors: Vec<String> },
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Envelope::Success {
            message: message.into(),
        }
    }

    pub fn failure(kind: FailureKind, errors: Vec<String>) -> Self {
        Envelope::Failure { kind, errors }
    }

    pub fn single(kind: FailureKind, error: impl Into<String>) -> Self {
        Envelope::Failure {
            kind,
            errors: vec![error.into()],
        }
    }

    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[String] {
        match self {
            Envelope::Success { .. } => &[],
            Envelope::Failure { errors, .. } => errors,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeBody<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [String]>,
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            Envelope::Success { message } => EnvelopeBody {
                success: true,
                message: Some(message),
                errors: None,
            },
            Envelope::Failure { errors, .. } => EnvelopeBody {
                success: false,
                message: None,
                errors: Some(errors),
            },
        };
        body.serialize(serializer)
    }
}
