//! User-facing notice classification

/// Tone of a notification banner.
///
/// Consumers map this to their own presentation (colors, icons, log
/// levels); the engine only distinguishes the three tones.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral guidance ("place your finger")
    Info,

    /// A step or workflow completed
    Success,

    /// Something failed and the operator should know
    Error,
}
