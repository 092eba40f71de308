//! Voice command classification
//!
//! Keyword matching on a free-text transcript. Checked in order, first
//! match wins, so "hi, thanks" is a greeting.

/// What the user seemed to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceReply {
    Greeting,
    SymptomHelp,
    Thanks,
    NotUnderstood,
}

impl VoiceReply {
    /// Canned response spoken back to the user.
    pub fn text(&self) -> &'static str {
        match self {
            VoiceReply::Greeting => "Hello! How can I help you today?",
            VoiceReply::SymptomHelp => {
                "I can help with symptom checking. Please describe your symptoms in detail."
            }
            VoiceReply::Thanks => "You're welcome! Is there anything else I can help with?",
            VoiceReply::NotUnderstood => {
                "I'm not sure I understand. Can you please rephrase or say 'help' for options?"
            }
        }
    }
}

const KEYWORDS: &[(&[&str], VoiceReply)] = &[
    (&["hello", "hi"], VoiceReply::Greeting),
    (&["symptoms", "not feeling well"], VoiceReply::SymptomHelp),
    (&["thank"], VoiceReply::Thanks),
];

/// Picks a reply for the transcript. Returns `None` for a blank transcript.
pub fn classify(transcript: &str) -> Option<VoiceReply> {
    let command = transcript.trim().to_lowercase();
    if command.is_empty() {
        return None;
    }

    let reply = KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| command.contains(w)))
        .map(|(_, reply)| *reply)
        .unwrap_or(VoiceReply::NotUnderstood);
    Some(reply)
}
