use log::{info, warn};

use super::commands::{VoiceReply, classify};
use super::speech::{SpeechCapability, TranscriptSegment, VoiceError};

pub const UNSUPPORTED_MESSAGE: &str =
    "Speech recognition is not supported here. Voice commands are unavailable.";
pub const LISTENING_MESSAGE: &str = "Listening...";
pub const STOPPED_MESSAGE: &str = "Stopped listening";

/// State of the voice page: the current transcript and the last response.
pub struct VoiceSession {
    speech: Box<dyn SpeechCapability>,
    transcript: String,
    feedback: String,
    unsupported: bool,
}

impl VoiceSession {
    pub fn new(speech: Box<dyn SpeechCapability>) -> Self {
        let unsupported = !speech.is_supported();
        if unsupported {
            info!("Voice page disabled: {} speech backend", speech.name());
        }
        Self {
            speech,
            transcript: String::new(),
            feedback: if unsupported {
                UNSUPPORTED_MESSAGE.to_string()
            } else {
                String::new()
            },
            unsupported,
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn is_supported(&self) -> bool {
        !self.unsupported
    }

    pub fn is_listening(&self) -> bool {
        self.speech.is_listening()
    }

    /// Starts or stops listening. Starting clears the old transcript.
    pub fn toggle_listening(&mut self) -> Result<(), VoiceError> {
        if self.unsupported {
            return Err(VoiceError::UnsupportedCapability);
        }

        if self.speech.is_listening() {
            self.speech.stop_listening();
            self.feedback = STOPPED_MESSAGE.to_string();
            return Ok(());
        }

        self.transcript.clear();
        match self.speech.start_listening() {
            Ok(()) => {
                self.feedback = LISTENING_MESSAGE.to_string();
                Ok(())
            }
            Err(e) => {
                warn!("Could not start listening: {}", e);
                self.unsupported = true;
                self.feedback = UNSUPPORTED_MESSAGE.to_string();
                Err(e)
            }
        }
    }

    /// Stops listening, e.g. when leaving the page.
    pub fn stop(&mut self) {
        if self.speech.is_listening() {
            self.speech.stop_listening();
        }
    }

    /// Drains pending recognition results. Returns true if the transcript changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(segment) = self.speech.poll_transcript() {
            changed |= self.ingest(segment);
        }
        changed
    }

    /// Each result replaces the displayed transcript, final or not.
    pub fn ingest(&mut self, segment: TranscriptSegment) -> bool {
        if segment.text == self.transcript {
            return false;
        }
        self.transcript = segment.text;
        true
    }

    /// Classifies the transcript, speaks the reply and shows it.
    /// Does nothing when the transcript is blank.
    pub fn process_command(&mut self) -> Option<VoiceReply> {
        let reply = classify(&self.transcript)?;
        let text = reply.text();
        info!("Voice command {:?} -> {:?}", self.transcript, reply);
        if let Err(e) = self.speech.speak(text) {
            warn!("Could not speak reply: {}", e);
        }
        self.feedback = text.to_string();
        Some(reply)
    }
}
