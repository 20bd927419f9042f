//! Rekursiv inmatning av en släktlinje: make/maka → relation → barn → barnens familjer.
//!
//! Rekursionen har inget djupmått; den tar slut när operatören svarar nej.
//! Sidnumret skickas som värde nedåt, så en ändring gäller på den nivån
//! och under den men aldrig uppåt.

use tracing::{info, warn};

use super::forms::{collect_child, collect_person, collect_relationship, relationship_updates};
use crate::db::Gateway;
use crate::ui::display::{person_label, print_stored, show_relationship};
use crate::ui::prompt::{ask_page_number, ask_yes_no_default};
use crate::ui::Console;
use crate::utils::error::AppResult;

pub struct FamilyBuilder<'a> {
    gateway: &'a dyn Gateway,
    console: &'a mut dyn Console,
}

impl<'a> FamilyBuilder<'a> {
    pub fn new(gateway: &'a dyn Gateway, console: &'a mut dyn Console) -> Self {
        Self { gateway, console }
    }

    pub fn console(&mut self) -> &mut dyn Console {
        &mut *self.console
    }

    /// Mata in, granska och spara en ny person
    pub fn add_person(&mut self, page_number: Option<i64>) -> AppResult<i64> {
        let mut person = collect_person(&mut *self.console, page_number)?;
        let person_id = self.gateway.create_person(&mut person)?;

        match self.gateway.get_person(person_id) {
            Ok(stored) => print_stored(&mut *self.console, "Sparad person:", &stored),
            Err(e) => warn!("Kunde inte läsa tillbaka person {}: {}", person_id, e),
        }

        Ok(person_id)
    }

    /// Mata in och spara en relation. Partner 2 saknas när maken/makan är okänd.
    pub fn add_relationship(&mut self, partner1_id: i64, partner2_id: Option<i64>) -> AppResult<i64> {
        let partner1_label = person_label(self.gateway, partner1_id)?;
        let partner2_label = match partner2_id {
            Some(id) => Some(person_label(self.gateway, id)?),
            None => None,
        };

        let draft = collect_relationship(&mut *self.console, partner1_label, partner2_label)?;
        let relationship_id = self.gateway.create_relationship(partner1_id, partner2_id)?;

        // Relationen finns redan; ett fel här tappar bara detaljerna
        match self
            .gateway
            .update_relationship(relationship_id, &relationship_updates(&draft))
        {
            Ok(report) if !report.unsupported.is_empty() => {
                warn!("Fält hoppades över: {}", report.unsupported.join(", "));
            }
            Ok(_) => {}
            Err(e) if e.is_persistence_failure() => {
                self.console
                    .say(&format!("FEL: Relationens uppgifter kunde inte sparas: {}", e));
            }
            Err(e) => return Err(e),
        }

        match self.gateway.get_relationship(relationship_id) {
            Ok(stored) => print_stored(&mut *self.console, "Sparad relation:", &stored),
            Err(e) => warn!("Kunde inte läsa tillbaka relation {}: {}", relationship_id, e),
        }

        Ok(relationship_id)
    }

    /// Koppla en person som barn till en relation; saknade ID:n efterfrågas
    pub fn add_child(&mut self, relationship_id: Option<i64>, person_id: Option<i64>) -> AppResult<i64> {
        let (relationship_id, person_id) =
            collect_child(&mut *self.console, relationship_id, person_id)?;
        let child_id = self.gateway.create_child(relationship_id, person_id)?;

        match self.gateway.get_child(child_id) {
            Ok(stored) => print_stored(&mut *self.console, "Sparat barn:", &stored),
            Err(e) => warn!("Kunde inte läsa tillbaka barnpost {}: {}", child_id, e),
        }

        Ok(child_id)
    }

    /// Bygg familjen för `head_id`: en relation per make/maka, med barn
    /// och (om operatören vill) barnens egna familjer.
    pub fn build_family(&mut self, head_id: i64, mut page_number: i64) -> AppResult<()> {
        info!("Bygger familj för person {} (sida {})", head_id, page_number);
        self.console.say("Lägger till en familj");

        loop {
            let spouse_known =
                ask_yes_no_default(&mut *self.console, "Är maken/makan känd (J/n)? ", true)?;

            let mut spouse_failed = false;
            let spouse_id = if spouse_known {
                page_number = ask_page_number(&mut *self.console, page_number)?;
                let spouse = self.attempt("Maken/makan", |b| b.add_person(Some(page_number)))?;
                spouse_failed = spouse.is_none();
                spouse
            } else {
                None
            };

            if !spouse_failed {
                if let Some(relationship_id) =
                    self.attempt("Relationen", |b| b.add_relationship(head_id, spouse_id))?
                {
                    page_number = self.add_children(relationship_id, page_number)?;
                }
            }

            let prompt = format!("Lägg till fler makar för {} (j/N)? ", self.label(head_id));
            if !ask_yes_no_default(&mut *self.console, &prompt, false)? {
                break;
            }
        }

        Ok(())
    }

    /// Barnslingan för en relation. Returnerar sidnumret som gäller efteråt
    /// på den här nivån.
    fn add_children(&mut self, relationship_id: i64, mut page_number: i64) -> AppResult<i64> {
        self.show(relationship_id)?;
        if !ask_yes_no_default(
            &mut *self.console,
            "Lägg till barn i relationen (j/N)? ",
            false,
        )? {
            return Ok(page_number);
        }

        loop {
            page_number = ask_page_number(&mut *self.console, page_number)?;

            if let Some(child_person_id) =
                self.attempt("Barnet", |b| b.add_person(Some(page_number)))?
            {
                let linked = self.attempt("Barnposten", |b| {
                    b.add_child(Some(relationship_id), Some(child_person_id))
                })?;

                if linked.is_some() {
                    let prompt = format!("Lägg till familj för {} (j/N)? ", self.label(child_person_id));
                    if ask_yes_no_default(&mut *self.console, &prompt, false)? {
                        self.build_family(child_person_id, page_number)?;
                    }
                }
            }

            self.show(relationship_id)?;
            if !ask_yes_no_default(
                &mut *self.console,
                "Lägg till fler barn i relationen (J/n)? ",
                true,
            )? {
                break;
            }
        }

        Ok(page_number)
    }

    /// Kör ett skapande. Ett lagringsfel visas och avbryter bara den posten;
    /// redan sparade poster ligger kvar.
    pub fn attempt<T>(
        &mut self,
        what: &str,
        create: impl FnOnce(&mut Self) -> AppResult<T>,
    ) -> AppResult<Option<T>> {
        match create(self) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_persistence_failure() => {
                warn!("{} kunde inte sparas: {}", what, e);
                self.console
                    .say(&format!("FEL: {} kunde inte sparas: {}", what, e));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn show(&mut self, relationship_id: i64) -> AppResult<()> {
        let shown = show_relationship(&mut *self.console, self.gateway, relationship_id);
        match shown {
            Err(e) if e.is_persistence_failure() => {
                warn!("Kunde inte visa relation {}: {}", relationship_id, e);
                Ok(())
            }
            other => other,
        }
    }

    fn label(&self, person_id: i64) -> String {
        person_label(self.gateway, person_id).unwrap_or_else(|_| format!("person {}", person_id))
    }
}
