//! Transcript mutations requested by other slices.

use super::{TranscriptEntry, TranscriptState};

/// A change to the transcript, applied by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptMutation {
    Append(TranscriptEntry),
    Clear,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
}

/// Applies a mutation to the transcript.
pub fn apply_mutation(transcript: &mut TranscriptState, mutation: TranscriptMutation) {
    match mutation {
        TranscriptMutation::Append(entry) => transcript.push(entry),
        TranscriptMutation::Clear => transcript.clear(),
        TranscriptMutation::PageUp => transcript.page_up(),
        TranscriptMutation::PageDown => transcript.page_down(),
        TranscriptMutation::ScrollToTop => transcript.scroll_to_top(),
        TranscriptMutation::ScrollToBottom => transcript.scroll_to_bottom(),
    }
}
