//! Enrollment records

use chrono::{DateTime, Utc};

use crate::template::Template;

/// One persisted enrollment: an identity bound to its template.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRecord {
    /// Caller-assigned identity (username or user id)
    pub identity: String,

    /// Template captured at enrollment time
    pub template: Template,

    /// When the enrollment was persisted
    pub enrolled_at: DateTime<Utc>,
}

impl EnrollmentRecord {
    /// Create a record stamped with the current time
    pub fn new(identity: impl Into<String>, template: Template) -> Self {
        Self {
            identity: identity.into(),
            template,
            enrolled_at: Utc::now(),
        }
    }
}
