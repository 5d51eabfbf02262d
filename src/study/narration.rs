//! Reading the summary aloud through a text-to-speech engine.

use crate::logger;
use regex::Regex;
use std::io;
use std::process::{Child, Command, Stdio};

lazy_static::lazy_static! {
    static ref PREFERRED_VOICE: Regex =
        Regex::new(r"(?i)female|woman|girl").expect("voice pattern is valid");
}

const FALLBACK_VOICE: &str = "Google US English";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub id: String,
}

impl Voice {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: name.to_string(),
        }
    }
}

pub trait SpeechEngine: Send {
    fn voices(&self) -> Vec<Voice>;
    fn speak(&mut self, text: &str, voice: Option<&Voice>) -> io::Result<()>;
    fn cancel(&mut self);
    /// Whether the last utterance is still playing.
    fn is_speaking(&mut self) -> bool;
}

/// A voice whose name or id looks female, else the fallback voice, else the
/// first one available.
pub fn pick_voice(voices: &[Voice]) -> Option<&Voice> {
    voices
        .iter()
        .find(|v| PREFERRED_VOICE.is_match(&format!("{}{}", v.name, v.id)))
        .or_else(|| voices.iter().find(|v| v.name.contains(FALLBACK_VOICE)))
        .or_else(|| voices.first())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    Idle,
    Speaking,
}

/// Owns at most one utterance. Toggling while speaking stops playback.
pub struct Narrator {
    engine: Box<dyn SpeechEngine>,
    speaking: bool,
}

impl Narrator {
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            speaking: false,
        }
    }

    pub fn toggle(&mut self, text: &str) -> io::Result<NarrationState> {
        if self.speaking {
            self.stop();
            return Ok(NarrationState::Idle);
        }
        if text.trim().is_empty() {
            return Ok(NarrationState::Idle);
        }

        let voices = self.engine.voices();
        let voice = pick_voice(&voices);
        if let Some(v) = voice {
            logger::log(&format!("Narrating with voice {}", v.name));
        }
        self.engine.speak(text, voice)?;
        self.speaking = true;
        Ok(NarrationState::Speaking)
    }

    pub fn stop(&mut self) {
        if self.speaking {
            self.engine.cancel();
            self.speaking = false;
        }
    }

    /// Picks up the end of an utterance that finished on its own.
    pub fn poll(&mut self) -> NarrationState {
        if self.speaking && !self.engine.is_speaking() {
            self.speaking = false;
        }
        self.state()
    }

    pub fn state(&self) -> NarrationState {
        if self.speaking {
            NarrationState::Speaking
        } else {
            NarrationState::Idle
        }
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Speaks by running an external program (`espeak`, `say`, ...) with
/// `-v <voice> <text>`; cancelling kills the child.
pub struct CommandSpeech {
    command: String,
    voices: Vec<Voice>,
    child: Option<Child>,
}

impl CommandSpeech {
    pub fn new(command: &str, voices: &[String]) -> Self {
        Self {
            command: command.to_string(),
            voices: voices.iter().map(|v| Voice::named(v)).collect(),
            child: None,
        }
    }
}

impl SpeechEngine for CommandSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, text: &str, voice: Option<&Voice>) -> io::Result<()> {
        self.cancel();
        let mut command = Command::new(&self.command);
        if let Some(v) = voice {
            command.arg("-v").arg(&v.id);
        }
        let child = command
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        match self.child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.child = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    pub struct SpeechLog {
        pub spoken: Vec<(String, Option<String>)>,
        pub cancels: usize,
        pub finished: bool,
    }

    /// Records calls into a shared log the test keeps a handle to.
    pub struct RecordingSpeech {
        pub voices: Vec<Voice>,
        pub log: Arc<Mutex<SpeechLog>>,
    }

    impl RecordingSpeech {
        pub fn new(voices: &[&str]) -> (Self, Arc<Mutex<SpeechLog>>) {
            let log = Arc::new(Mutex::new(SpeechLog::default()));
            let engine = Self {
                voices: voices.iter().map(|v| Voice::named(v)).collect(),
                log: log.clone(),
            };
            (engine, log)
        }
    }

    impl SpeechEngine for RecordingSpeech {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&mut self, text: &str, voice: Option<&Voice>) -> io::Result<()> {
            let mut log = self.log.lock().unwrap();
            log.finished = false;
            log.spoken.push((text.to_string(), voice.map(|v| v.name.clone())));
            Ok(())
        }

        fn cancel(&mut self) {
            self.log.lock().unwrap().cancels += 1;
        }

        fn is_speaking(&mut self) -> bool {
            !self.log.lock().unwrap().finished
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingSpeech;
    use super::*;

    #[test]
    fn test_pick_voice_prefers_female_pattern() {
        let voices = vec![
            Voice::named("Alex"),
            Voice::named("Google US English"),
            Voice::named("Samantha (Female)"),
        ];
        assert_eq!(pick_voice(&voices).unwrap().name, "Samantha (Female)");
    }

    #[test]
    fn test_pick_voice_matches_id_case_insensitively() {
        let voices = vec![
            Voice::named("Alex"),
            Voice {
                name: "Voice 2".into(),
                id: "en-us-WOMAN-1".into(),
            },
        ];
        assert_eq!(pick_voice(&voices).unwrap().name, "Voice 2");
    }

    #[test]
    fn test_pick_voice_fallbacks() {
        let voices = vec![Voice::named("Alex"), Voice::named("Google US English")];
        assert_eq!(pick_voice(&voices).unwrap().name, "Google US English");

        let voices = vec![Voice::named("Alex"), Voice::named("Daniel")];
        assert_eq!(pick_voice(&voices).unwrap().name, "Alex");

        assert!(pick_voice(&[]).is_none());
    }

    #[test]
    fn test_toggle_starts_then_cancels() {
        let (engine, log) = RecordingSpeech::new(&["Alex", "Victoria female"]);
        let mut narrator = Narrator::new(Box::new(engine));

        assert_eq!(narrator.toggle("Summary").unwrap(), NarrationState::Speaking);
        assert_eq!(narrator.toggle("Summary").unwrap(), NarrationState::Idle);

        let log = log.lock().unwrap();
        assert_eq!(log.spoken.len(), 1);
        assert_eq!(log.spoken[0].1.as_deref(), Some("Victoria female"));
        assert_eq!(log.cancels, 1);
    }

    #[test]
    fn test_empty_text_is_not_spoken() {
        let (engine, log) = RecordingSpeech::new(&[]);
        let mut narrator = Narrator::new(Box::new(engine));
        assert_eq!(narrator.toggle("   ").unwrap(), NarrationState::Idle);
        assert!(log.lock().unwrap().spoken.is_empty());
    }

    #[test]
    fn test_poll_notices_natural_end() {
        let (engine, log) = RecordingSpeech::new(&[]);
        let mut narrator = Narrator::new(Box::new(engine));
        narrator.toggle("Summary").unwrap();
        assert_eq!(narrator.poll(), NarrationState::Speaking);

        log.lock().unwrap().finished = true;
        assert_eq!(narrator.poll(), NarrationState::Idle);

        // A fresh toggle starts a new utterance rather than cancelling.
        assert_eq!(narrator.toggle("Again").unwrap(), NarrationState::Speaking);
        assert_eq!(log.lock().unwrap().spoken.len(), 2);
    }

    #[test]
    fn test_drop_cancels_playback() {
        let (engine, log) = RecordingSpeech::new(&[]);
        {
            let mut narrator = Narrator::new(Box::new(engine));
            narrator.toggle("Summary").unwrap();
        }
        assert_eq!(log.lock().unwrap().cancels, 1);
    }
}
