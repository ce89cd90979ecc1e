//! Script representation.

use core::fmt;

/// What a single script line answers.
///
/// Simulation prompts are named individually so callers and tests can locate
/// them; the long tail of project-manager menu picks is carried as `Menu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prompt {
    SkipConfigConfirm,
    InitiateSimulation,
    ZoneResultsLibrary,
    MassFlowResultsLibrary,
    PlantResultsLibrary,
    PeriodStart,
    PeriodEnd,
    StartupDays,
    BuildingTimeSteps,
    PlantTimeSteps,
    HourlyIntegration,
    SaveLevel,
    Commence,
    UseSuggestedControl,
    ResultSetDescription,
    ContinueSimulation,
    SaveResults,
    Confirm,
    FileName,
    Value,
    ExitMenu,
    QuitModule,
    Menu(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub prompt: Prompt,
    pub response: String,
}

/// An ordered list of menu responses, one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prompt: Prompt, response: impl Into<String>) -> &mut Self {
        self.lines.push(ScriptLine {
            prompt,
            response: response.into(),
        });
        self
    }

    /// Builder form of [`Script::push`].
    pub fn then(mut self, prompt: Prompt, response: impl Into<String>) -> Self {
        self.push(prompt, response);
        self
    }

    pub fn append(&mut self, other: Script) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn count(&self, prompt: Prompt) -> usize {
        self.lines.iter().filter(|l| l.prompt == prompt).count()
    }

    pub fn position(&self, prompt: Prompt) -> Option<usize> {
        self.lines.iter().position(|l| l.prompt == prompt)
    }

    /// Full stdin payload: every response followed by `\n`.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.response.len() + 1).sum());
        for line in &self.lines {
            text.push_str(&line.response);
            text.push('\n');
        }
        text
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_text().into_bytes()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{:<24} {}", format!("{:?}", line.prompt), line.response)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_terminates_every_line() {
        let script = Script::new()
            .then(Prompt::SkipConfigConfirm, "")
            .then(Prompt::InitiateSimulation, "c");
        assert_eq!(script.to_text(), "\nc\n");
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn empty_script_is_empty_payload() {
        assert!(Script::new().to_bytes().is_empty());
    }

    #[test]
    fn append_keeps_order() {
        let mut a = Script::new().then(Prompt::ExitMenu, "-");
        a.append(Script::new().then(Prompt::QuitModule, "-"));
        assert_eq!(a.position(Prompt::QuitModule), Some(1));
        assert_eq!(a.count(Prompt::ExitMenu), 1);
    }
}
