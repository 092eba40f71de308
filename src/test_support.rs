//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::advice::LocalAdviceSource;
use crate::core::state::App;
use crate::voice::{SpeechCapability, TranscriptSegment, VoiceError, VoiceSession};

/// Speech backend that replays canned transcript segments while listening
/// and records everything it is asked to say.
pub struct ScriptedSpeech {
    segments: VecDeque<TranscriptSegment>,
    listening: bool,
    spoken: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSpeech {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            segments: segments.into(),
            listening: false,
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared log of spoken replies, readable after the session took ownership.
    pub fn spoken(&self) -> Arc<Mutex<Vec<String>>> {
        self.spoken.clone()
    }
}

impl SpeechCapability for ScriptedSpeech {
    fn name(&self) -> &str {
        "scripted"
    }

    fn start_listening(&mut self) -> Result<(), VoiceError> {
        self.listening = true;
        Ok(())
    }

    fn stop_listening(&mut self) {
        self.listening = false;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn poll_transcript(&mut self) -> Option<TranscriptSegment> {
        if !self.listening {
            return None;
        }
        self.segments.pop_front()
    }

    fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(text.to_string());
        }
        Ok(())
    }
}

/// Creates a test App backed by the built-in advice table.
pub fn test_app() -> App {
    App::new(
        Arc::new(LocalAdviceSource),
        VoiceSession::new(Box::new(ScriptedSpeech::new(Vec::new()))),
    )
}
