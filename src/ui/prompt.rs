//! Tolkning av operatörens svar. Felaktiga svar ger en felrad och en ny fråga.

use super::Console;
use crate::db::{FieldKind, FieldValue};
use crate::models::{non_empty, Gender, PartialDate};
use crate::utils::date::normalize_date;
use crate::utils::error::{AppError, AppResult};

/// `Some(true)` för ja, `Some(false)` för nej, annars `None`
pub fn parse_yes_no(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "j" | "ja" | "y" | "yes" => Some(true),
        "n" | "nej" | "no" => Some(false),
        _ => None,
    }
}

/// Fritext; tomt svar ger `None`
pub fn ask_text(console: &mut dyn Console, prompt: &str) -> AppResult<Option<String>> {
    Ok(non_empty(&console.read_line(prompt)?))
}

/// Ja/nej utan standardsvar
pub fn ask_yes_no(console: &mut dyn Console, prompt: &str) -> AppResult<bool> {
    loop {
        match parse_yes_no(&console.read_line(prompt)?) {
            Some(answer) => return Ok(answer),
            None => console.say("FEL: Svara j(a) eller n(ej)."),
        }
    }
}

/// Ja/nej där tomt svar ger `default`
pub fn ask_yes_no_default(console: &mut dyn Console, prompt: &str, default: bool) -> AppResult<bool> {
    loop {
        let answer = console.read_line(prompt)?;
        if answer.trim().is_empty() {
            return Ok(default);
        }
        match parse_yes_no(&answer) {
            Some(answer) => return Ok(answer),
            None => console.say("FEL: Svara j(a) eller n(ej)."),
        }
    }
}

/// Tolka ett heltal större än noll
pub fn parse_integer(s: &str) -> AppResult<i64> {
    let s = s.trim();
    match s.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::InvalidIntegerInput(s.to_string())),
    }
}

/// Heltal; tomt svar ger `None` om `allow_empty`, annars ny fråga
pub fn ask_integer(
    console: &mut dyn Console,
    prompt: &str,
    allow_empty: bool,
) -> AppResult<Option<i64>> {
    loop {
        let answer = console.read_line(prompt)?;
        if answer.trim().is_empty() {
            if allow_empty {
                return Ok(None);
            }
            console.say("FEL: Ange ett värde.");
            continue;
        }

        match parse_integer(&answer) {
            Ok(n) => return Ok(Some(n)),
            Err(e) => console.say(&format!("FEL: {}. Ange ett heltal större än noll.", e)),
        }
    }
}

/// Obligatoriskt ID-nummer
pub fn ask_id(console: &mut dyn Console, prompt: &str) -> AppResult<i64> {
    loop {
        if let Some(id) = ask_integer(console, prompt, false)? {
            return Ok(id);
        }
    }
}

/// Sidnummer med nuvarande värde som standard
pub fn ask_page_number(console: &mut dyn Console, current: i64) -> AppResult<i64> {
    let prompt = format!("Sidnummer (standard {}): ", current);
    Ok(ask_integer(console, &prompt, true)?.unwrap_or(current))
}

/// Datum i formen `DD.MM.YYYY`, `MM.YYYY` eller `YYYY`.
///
/// Ogiltigt format ger en ny fråga. Orimliga siffror (månad 13) accepteras
/// men visas som varning.
pub fn ask_date(console: &mut dyn Console, prompt: &str) -> AppResult<PartialDate> {
    loop {
        let answer = console.read_line(prompt)?;
        match normalize_date(&answer) {
            Ok(date) => {
                if let Some(warning) = date.calendar_warning() {
                    console.say(&format!("VARNING: {}", warning));
                }
                return Ok(date);
            }
            Err(e) => console.say(&format!("FEL: {}. Använd DD.MM.ÅÅÅÅ, MM.ÅÅÅÅ eller ÅÅÅÅ.", e)),
        }
    }
}

/// Tolka ett fältvärde skrivet av operatören, t.ex. i `fält = värde`.
///
/// Heltalsfälten är sidnummer och ID:n, så bara positiva tal tas emot.
/// Tomt värde tömmer fältet där det går.
pub fn parse_field_value(kind: FieldKind, raw: &str) -> AppResult<FieldValue> {
    let s = raw.trim();
    match kind {
        FieldKind::Text => Ok(FieldValue::Text(non_empty(s))),
        FieldKind::Integer if s.is_empty() => Ok(FieldValue::Integer(None)),
        FieldKind::Integer => parse_integer(s).map(|n| FieldValue::Integer(Some(n))),
        FieldKind::Bool => parse_yes_no(s)
            .map(FieldValue::Bool)
            .ok_or_else(|| AppError::InvalidYesNo(s.to_string())),
        FieldKind::Date => normalize_date(s).map(FieldValue::Date),
        FieldKind::Gender => Ok(FieldValue::Gender(Gender::parse(s))),
    }
}
