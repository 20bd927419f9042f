//! Huvudmeny för registreringen

use tracing::{info, warn};

use crate::db::fields::{field_kind, PERSON_FIELDS};
use crate::db::{FieldUpdate, FieldValue, Gateway};
use crate::models::non_empty;
use crate::services::{infer_deceased, FamilyBuilder};
use crate::ui::display::{person_label, print_stored, show_relationship};
use crate::ui::prompt::{ask_id, ask_page_number, ask_yes_no_default, parse_field_value};
use crate::ui::Console;
use crate::utils::error::{AppError, AppResult};

/// Vad operatören vill registrera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Person,
    Relationship,
    Child,
    EditPerson,
    Quit,
}

impl EntryMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "p" | "person" => Some(Self::Person),
            "r" | "relation" | "relationship" => Some(Self::Relationship),
            "b" | "barn" | "c" | "child" => Some(Self::Child),
            "ä" | "ändra" | "e" | "edit" => Some(Self::EditPerson),
            "" | "a" | "avsluta" | "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub struct EntryApp<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> EntryApp<'a> {
    pub fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    /// Visa menyn tills operatören avslutar. Stängd inmatning avbryter
    /// med `InputClosed`; det som redan sparats ligger kvar.
    pub fn run(&self, console: &mut dyn Console) -> AppResult<()> {
        loop {
            let answer = console.read_line(
                "Lägg till (p)erson, (r)elation, (b)arn, (ä)ndra person eller (a)vsluta? ",
            )?;

            let mode = match EntryMode::parse(&answer) {
                Some(EntryMode::Quit) => return Ok(()),
                Some(mode) => mode,
                None => {
                    console.say(&format!("FEL: Okänt val: {}", answer.trim()));
                    continue;
                }
            };

            info!("Startar registrering: {:?}", mode);
            match self.run_mode(console, mode) {
                Err(e) if e.is_persistence_failure() => {
                    warn!("{:?} avbröts: {}", mode, e);
                    console.say(&format!("FEL: {}", e));
                }
                other => other?,
            }
        }
    }

    pub fn run_mode(&self, console: &mut dyn Console, mode: EntryMode) -> AppResult<()> {
        match mode {
            EntryMode::Person => self.enter_persons(console),
            EntryMode::Relationship => self.enter_relationships(console),
            EntryMode::Child => self.enter_children(console),
            EntryMode::EditPerson => self.edit_person(console),
            EntryMode::Quit => Ok(()),
        }
    }

    fn enter_persons(&self, console: &mut dyn Console) -> AppResult<()> {
        let mut builder = FamilyBuilder::new(self.gateway, console);
        let mut page_number = ask_id(builder.console(), "Sidnummer: ")?;

        loop {
            if let Some(person_id) = builder.attempt("Personen", |b| b.add_person(Some(page_number)))? {
                let label = person_label(self.gateway, person_id)?;
                let prompt = format!("Lägg till familj för {} (J/n)? ", label);
                if ask_yes_no_default(builder.console(), &prompt, true)? {
                    builder.build_family(person_id, page_number)?;
                }
            }

            if !ask_yes_no_default(builder.console(), "Lägg till fler personer (J/n)? ", true)? {
                return Ok(());
            }
            page_number = ask_page_number(builder.console(), page_number)?;
        }
    }

    fn enter_relationships(&self, console: &mut dyn Console) -> AppResult<()> {
        let mut builder = FamilyBuilder::new(self.gateway, console);

        loop {
            let partner1_id = ask_id(builder.console(), "Person-ID för partner 1: ")?;
            let partner2_id =
                if ask_yes_no_default(builder.console(), "Är maken/makan känd (J/n)? ", true)? {
                    Some(ask_id(builder.console(), "Person-ID för partner 2: ")?)
                } else {
                    None
                };

            builder.attempt("Relationen", |b| b.add_relationship(partner1_id, partner2_id))?;

            if !ask_yes_no_default(builder.console(), "Lägg till fler relationer (J/n)? ", true)? {
                return Ok(());
            }
        }
    }

    fn enter_children(&self, console: &mut dyn Console) -> AppResult<()> {
        let relationship_id = ask_id(console, "Relations-ID: ")?;
        show_relationship(console, self.gateway, relationship_id)?;

        let mut builder = FamilyBuilder::new(self.gateway, console);
        loop {
            builder.attempt("Barnposten", |b| b.add_child(Some(relationship_id), None))?;

            if !ask_yes_no_default(builder.console(), "Lägg till fler barn (J/n)? ", true)? {
                return Ok(());
            }
        }
    }

    /// Visa personen och ändra fält med rader som `birth_place = Ljusdal`
    fn edit_person(&self, console: &mut dyn Console) -> AppResult<()> {
        let person_id = ask_id(console, "Person-ID: ")?;
        let person = self.gateway.get_person(person_id)?;
        print_stored(console, "Nuvarande uppgifter:", &person);
        for rel in self.gateway.relationships_of(person_id)? {
            if let Some(id) = rel.id {
                show_relationship(console, self.gateway, id)?;
            }
        }

        let mut updates = Vec::new();
        loop {
            let line = console.read_line("Fält = värde (tom rad avslutar): ")?;
            if line.trim().is_empty() {
                break;
            }

            match parse_assignment(&line) {
                Ok(update) => updates.push(update),
                Err(e) => console.say(&format!("FEL: {}", e)),
            }
        }

        if updates.is_empty() {
            return Ok(());
        }

        let report = self.gateway.update_person(person_id, &updates)?;
        for name in &report.unsupported {
            console.say(&format!("FEL: {}", AppError::UnsupportedField(name.clone())));
        }

        self.keep_deceased_consistent(console, person_id)?;
        print_stored(console, "Sparad person:", &self.gateway.get_person(person_id)?);
        Ok(())
    }

    /// Ett dödsdatum eller tidigt födelseår betyder alltid avliden
    fn keep_deceased_consistent(&self, console: &mut dyn Console, person_id: i64) -> AppResult<()> {
        let person = self.gateway.get_person(person_id)?;
        if person.deceased || infer_deceased(&person.death_date, &person.birth_date) != Some(true) {
            return Ok(());
        }

        warn!("Person {} markeras som avliden", person_id);
        console.say("VARNING: Avliden sattes till ja utifrån födelse- eller dödsdatum.");
        self.gateway
            .update_person(person_id, &[FieldUpdate::new("deceased", FieldValue::Bool(true))])?;
        Ok(())
    }
}

/// Tolka `fält = värde`. Okända fältnamn skickas vidare som text så att
/// lagringen rapporterar dem.
fn parse_assignment(line: &str) -> AppResult<FieldUpdate> {
    let (name, raw) = line
        .split_once('=')
        .ok_or_else(|| AppError::UnsupportedField(line.trim().to_string()))?;
    let name = name.trim();

    let value = match field_kind(PERSON_FIELDS, name) {
        Some(kind) => parse_field_value(kind, raw)?,
        None => FieldValue::Text(non_empty(raw)),
    };

    Ok(FieldUpdate::new(name, value))
}
