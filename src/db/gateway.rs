//! Lagringsgränssnittet som inmatningsflödet använder.
//!
//! Ingen SQL läcker ut härifrån; allt går som strukturerad data.

use super::fields::{FieldUpdate, UpdateReport};
use super::Database;
use crate::models::{Child, Person, Relationship};
use crate::utils::error::{AppError, AppResult};

pub trait Gateway {
    fn create_person(&self, person: &mut Person) -> AppResult<i64>;
    fn update_person(&self, person_id: i64, updates: &[FieldUpdate]) -> AppResult<UpdateReport>;
    fn create_relationship(&self, partner1_id: i64, partner2_id: Option<i64>) -> AppResult<i64>;
    fn update_relationship(
        &self,
        relationship_id: i64,
        updates: &[FieldUpdate],
    ) -> AppResult<UpdateReport>;
    fn create_child(&self, relationship_id: i64, person_id: i64) -> AppResult<i64>;
    fn get_person(&self, person_id: i64) -> AppResult<Person>;
    fn get_relationship(&self, relationship_id: i64) -> AppResult<Relationship>;
    fn get_child(&self, child_id: i64) -> AppResult<Child>;

    /// Barnposter i en relation, för visning
    fn children_of(&self, relationship_id: i64) -> AppResult<Vec<Child>>;

    /// Relationer där personen är partner, för visning
    fn relationships_of(&self, person_id: i64) -> AppResult<Vec<Relationship>>;
}

impl Gateway for Database {
    fn create_person(&self, person: &mut Person) -> AppResult<i64> {
        self.persons().create(person)
    }

    fn update_person(&self, person_id: i64, updates: &[FieldUpdate]) -> AppResult<UpdateReport> {
        self.persons().update_fields(person_id, updates)
    }

    fn create_relationship(&self, partner1_id: i64, partner2_id: Option<i64>) -> AppResult<i64> {
        self.relationships().create(partner1_id, partner2_id)
    }

    fn update_relationship(
        &self,
        relationship_id: i64,
        updates: &[FieldUpdate],
    ) -> AppResult<UpdateReport> {
        self.relationships().update_fields(relationship_id, updates)
    }

    fn create_child(&self, relationship_id: i64, person_id: i64) -> AppResult<i64> {
        self.children().create(relationship_id, person_id)
    }

    fn get_person(&self, person_id: i64) -> AppResult<Person> {
        self.persons()
            .find_by_id(person_id)?
            .ok_or_else(|| AppError::not_found(format!("person {}", person_id)))
    }

    fn get_relationship(&self, relationship_id: i64) -> AppResult<Relationship> {
        self.relationships()
            .find_by_id(relationship_id)?
            .ok_or_else(|| AppError::not_found(format!("relation {}", relationship_id)))
    }

    fn get_child(&self, child_id: i64) -> AppResult<Child> {
        self.children()
            .find_by_id(child_id)?
            .ok_or_else(|| AppError::not_found(format!("barnpost {}", child_id)))
    }

    fn children_of(&self, relationship_id: i64) -> AppResult<Vec<Child>> {
        self.children().find_by_relationship(relationship_id)
    }

    fn relationships_of(&self, person_id: i64) -> AppResult<Vec<Relationship>> {
        self.relationships().find_by_partner(person_id)
    }
}
