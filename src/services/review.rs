//! Inmatning med granskning: samla fält, visa sammanfattning, bekräfta.
//!
//! Ett nej vid granskningen startar om hela inmatningen från första
//! fältet med ett nytt utkast.

use crate::ui::prompt::ask_yes_no;
use crate::ui::Console;
use crate::utils::error::AppResult;

/// Ett utkast som kan sammanfattas för granskning
pub trait Review {
    fn summary(&self) -> Vec<(&'static str, String)>;
}

/// Ett inmatningssteg som fyller i en del av utkastet
pub type Step<'a, D> = Box<dyn FnMut(&mut dyn Console, &mut D) -> AppResult<()> + 'a>;

type Validator<'a, D> = Box<dyn Fn(&D) -> AppResult<()> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Collecting,
    Reviewing,
    Done,
}

pub struct ReviewLoop<'a, D> {
    title: String,
    steps: Vec<Step<'a, D>>,
    validator: Option<Validator<'a, D>>,
}

impl<'a, D: Clone + Review> ReviewLoop<'a, D> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
            validator: None,
        }
    }

    pub fn step(mut self, step: impl FnMut(&mut dyn Console, &mut D) -> AppResult<()> + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Kontroll efter inmatningen; fel visas och inmatningen börjar om
    pub fn validate_with(mut self, validator: impl Fn(&D) -> AppResult<()> + 'a) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Kör inmatningen tills operatören godkänner utkastet
    pub fn run(&mut self, console: &mut dyn Console, seed: &D) -> AppResult<D> {
        let mut state = ReviewState::Collecting;
        let mut draft = seed.clone();

        loop {
            state = match state {
                ReviewState::Collecting => {
                    draft = seed.clone();
                    for step in self.steps.iter_mut() {
                        step(console, &mut draft)?;
                    }
                    self.check(console, &draft)
                }
                ReviewState::Reviewing => {
                    self.render(console, &draft);
                    if ask_yes_no(console, "Ser allt korrekt ut (j/n)? ")? {
                        ReviewState::Done
                    } else {
                        console.say("Frågar efter uppgifterna igen.");
                        ReviewState::Collecting
                    }
                }
                ReviewState::Done => return Ok(draft),
            };
        }
    }

    fn check(&self, console: &mut dyn Console, draft: &D) -> ReviewState {
        match self.validator.as_ref().map(|validate| validate(draft)) {
            Some(Err(e)) => {
                console.say(&format!("FEL: {}", e));
                ReviewState::Collecting
            }
            _ => ReviewState::Reviewing,
        }
    }

    fn render(&self, console: &mut dyn Console, draft: &D) {
        console.say("");
        console.say(&format!("Granska {}:", self.title));
        for (label, value) in draft.summary() {
            console.say(&format!("- {}: {}", label, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::prompt::ask_text;
    use crate::ui::ScriptedConsole;
    use crate::utils::error::AppError;

    #[derive(Debug, Clone, Default)]
    struct Note {
        lines: Vec<String>,
    }

    impl Review for Note {
        fn summary(&self) -> Vec<(&'static str, String)> {
            vec![("Rader", self.lines.join(" / "))]
        }
    }

    fn note_loop<'a>() -> ReviewLoop<'a, Note> {
        ReviewLoop::new("anteckning")
            .step(|console, note: &mut Note| {
                if let Some(line) = ask_text(console, "Rad 1: ")? {
                    note.lines.push(line);
                }
                Ok(())
            })
            .step(|console, note: &mut Note| {
                if let Some(line) = ask_text(console, "Rad 2: ")? {
                    note.lines.push(line);
                }
                Ok(())
            })
    }

    #[test]
    fn test_accept_returns_draft() {
        let mut console = ScriptedConsole::new(&["a", "b", "j"]);
        let note = note_loop().run(&mut console, &Note::default()).unwrap();

        assert_eq!(note.lines, vec!["a", "b"]);
        assert!(console.said("Granska anteckning:"));
        assert!(console.said("- Rader: a / b"));
    }

    #[test]
    fn test_reject_restarts_from_first_step() {
        let mut console = ScriptedConsole::new(&["a", "b", "n", "c", "d", "ja"]);
        let note = note_loop().run(&mut console, &Note::default()).unwrap();

        // Inget från första utkastet följer med
        assert_eq!(note.lines, vec!["c", "d"]);
        assert_eq!(console.prompts[3], "Rad 1: ");
    }

    #[test]
    fn test_restart_begins_from_seed() {
        let seed = Note {
            lines: vec!["förifyllt".into()],
        };
        let mut console = ScriptedConsole::new(&["a", "", "nej", "", "b", "y"]);
        let note = note_loop().run(&mut console, &seed).unwrap();

        assert_eq!(note.lines, vec!["förifyllt", "b"]);
    }

    #[test]
    fn test_malformed_confirm_stays_in_review() {
        let mut console = ScriptedConsole::new(&["a", "b", "kanske", "", "j"]);
        let note = note_loop().run(&mut console, &Note::default()).unwrap();

        assert_eq!(note.lines, vec!["a", "b"]);
        // Två fält och tre granskningsfrågor
        assert_eq!(console.prompts.len(), 5);
        assert!(console.prompts[2..].iter().all(|p| p.starts_with("Ser allt korrekt")));
    }

    #[test]
    fn test_failed_validation_recollects() {
        let mut console = ScriptedConsole::new(&["", "", "a", "", "j"]);
        let mut review = note_loop().validate_with(|note: &Note| {
            if note.lines.is_empty() {
                Err(AppError::UnresolvedRequiredField("rad"))
            } else {
                Ok(())
            }
        });

        let note = review.run(&mut console, &Note::default()).unwrap();
        assert_eq!(note.lines, vec!["a"]);
        assert!(console.said("FEL"));
    }

    #[test]
    fn test_closed_input_aborts() {
        let mut console = ScriptedConsole::new(&["a"]);
        let result = note_loop().run(&mut console, &Note::default());
        assert!(matches!(result, Err(AppError::InputClosed)));
    }
}
