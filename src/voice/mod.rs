//! # Voice Page
//!
//! A speech-driven side door into the assistant. It does not take part in
//! the USSD menus: it keeps only the current transcript and the last reply.

pub mod commands;
pub mod session;
pub mod speech;

pub use commands::{VoiceReply, classify};
pub use session::VoiceSession;
pub use speech::{
    Dictation, KeyboardSpeech, SpeechCapability, TranscriptSegment, UnsupportedSpeech, VoiceError,
};
