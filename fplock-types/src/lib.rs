//! Type definitions for fplock

pub mod error;
pub mod notice;
pub mod record;
pub mod template;

pub use error::StoreError;
pub use notice::NoticeKind;
pub use record::EnrollmentRecord;
pub use template::Template;
