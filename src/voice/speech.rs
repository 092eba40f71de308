//! Speech capability seam.
//!
//! The voice page talks to recognition and synthesis only through
//! [`SpeechCapability`]. Which implementation is used is decided once at
//! startup, so call sites never check for platform support themselves.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// Speech recognition is not available here. Not retried.
    UnsupportedCapability,
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceError::UnsupportedCapability => write!(f, "speech recognition is not supported"),
        }
    }
}

impl std::error::Error for VoiceError {}

/// One recognition result. Interim results may be replaced by later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

pub trait SpeechCapability: Send {
    fn name(&self) -> &str;

    fn is_supported(&self) -> bool {
        true
    }

    fn start_listening(&mut self) -> Result<(), VoiceError>;

    fn stop_listening(&mut self);

    fn is_listening(&self) -> bool;

    /// Next recognition result, if one arrived since the last poll.
    fn poll_transcript(&mut self) -> Option<TranscriptSegment>;

    fn speak(&mut self, text: &str) -> Result<(), VoiceError>;
}

/// Selected when the environment has no speech engine.
#[derive(Debug, Default)]
pub struct UnsupportedSpeech;

impl SpeechCapability for UnsupportedSpeech {
    fn name(&self) -> &str {
        "unsupported"
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn start_listening(&mut self) -> Result<(), VoiceError> {
        Err(VoiceError::UnsupportedCapability)
    }

    fn stop_listening(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }

    fn poll_transcript(&mut self) -> Option<TranscriptSegment> {
        None
    }

    fn speak(&mut self, _text: &str) -> Result<(), VoiceError> {
        Err(VoiceError::UnsupportedCapability)
    }
}

/// Terminal stand-in for a recogniser: the user types what they would say.
///
/// The TUI holds the [`Dictation`] half and feeds keystrokes into it; this
/// half hands them out as transcript segments, the way a real engine
/// delivers results. Synthesis is logged, since a terminal can't talk.
pub struct KeyboardSpeech {
    listening: Arc<AtomicBool>,
    segments: Receiver<TranscriptSegment>,
    last_spoken: Option<String>,
}

/// Keyboard side of [`KeyboardSpeech`].
pub struct Dictation {
    listening: Arc<AtomicBool>,
    sender: Sender<TranscriptSegment>,
    utterance: String,
}

impl KeyboardSpeech {
    pub fn new() -> (Self, Dictation) {
        let listening = Arc::new(AtomicBool::new(false));
        let (sender, segments) = mpsc::channel();
        (
            Self {
                listening: listening.clone(),
                segments,
                last_spoken: None,
            },
            Dictation {
                listening,
                sender,
                utterance: String::new(),
            },
        )
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_deref()
    }
}

impl SpeechCapability for KeyboardSpeech {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn start_listening(&mut self) -> Result<(), VoiceError> {
        // Results from a previous run are stale
        while self.segments.try_recv().is_ok() {}
        self.listening.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_listening(&mut self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn poll_transcript(&mut self) -> Option<TranscriptSegment> {
        self.segments.try_recv().ok()
    }

    fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        info!("Speaking: {}", text);
        self.last_spoken = Some(text.to_string());
        Ok(())
    }
}

impl Dictation {
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    /// Adds a typed character. Ignored unless listening.
    pub fn push_char(&mut self, c: char) {
        if !self.is_listening() {
            return;
        }
        self.utterance.push(c);
        self.emit(false);
    }

    pub fn backspace(&mut self) {
        if !self.is_listening() {
            return;
        }
        if self.utterance.pop().is_some() {
            self.emit(false);
        }
    }

    /// Ends the current utterance as a final result.
    pub fn commit(&mut self) {
        if !self.is_listening() || self.utterance.trim().is_empty() {
            return;
        }
        self.emit(true);
        self.utterance.clear();
    }

    /// Drops a half-typed utterance without delivering it.
    pub fn discard(&mut self) {
        self.utterance.clear();
    }

    fn emit(&self, is_final: bool) {
        let segment = TranscriptSegment {
            text: self.utterance.clone(),
            is_final,
        };
        if self.sender.send(segment).is_err() {
            debug!("Dictation dropped: recogniser gone");
        }
    }
}
