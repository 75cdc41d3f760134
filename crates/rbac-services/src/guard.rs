//! Cross-entity write guards
//!
//! A guard runs against the row about to be written (after contracts passed
//! and fields were applied) and may consult other stores.

use std::sync::Arc;

use async_trait::async_trait;
use rbac_core::error::ServiceError;
use rbac_core::result::ServiceResult;
use rbac_core::traits::Id;
use rbac_db::{PersonRepository, Repository, RepositoryError};
use rbac_models::Person;

#[async_trait]
pub trait WriteGuard<E>: Send + Sync {
    async fn check(&self, entity: &E) -> ServiceResult<()>;
}

fn lookup_failed(err: RepositoryError) -> ServiceError {
    ServiceError::external_with_source("person lookup failed", err)
}

/// Referenced person must exist
pub struct PersonExistsGuard<E> {
    persons: Arc<dyn PersonRepository>,
    person_id: fn(&E) -> Id,
}

impl<E> PersonExistsGuard<E> {
    pub fn new(persons: Arc<dyn PersonRepository>, person_id: fn(&E) -> Id) -> Self {
        Self { persons, person_id }
    }
}

#[async_trait]
impl<E: Send + Sync> WriteGuard<E> for PersonExistsGuard<E> {
    async fn check(&self, entity: &E) -> ServiceResult<()> {
        let id = (self.person_id)(entity);
        if self.persons.person_exists(id).await.map_err(lookup_failed)? {
            Ok(())
        } else {
            Err(ServiceError::validation(
                "person_id",
                format!("person {} does not exist", id),
            ))
        }
    }
}

/// Referenced person must exist and be active
pub struct ActivePersonGuard<E> {
    persons: Arc<dyn Repository<Person>>,
    person_id: fn(&E) -> Id,
}

impl<E> ActivePersonGuard<E> {
    pub fn new(persons: Arc<dyn Repository<Person>>, person_id: fn(&E) -> Id) -> Self {
        Self { persons, person_id }
    }
}

#[async_trait]
impl<E: Send + Sync> WriteGuard<E> for ActivePersonGuard<E> {
    async fn check(&self, entity: &E) -> ServiceResult<()> {
        let id = (self.person_id)(entity);
        match self.persons.get_by_id(id).await.map_err(lookup_failed)? {
            Some(person) if person.is_active => Ok(()),
            Some(_) => Err(ServiceError::validation(
                "person_id",
                format!("person {} is inactive", id),
            )),
            None => Err(ServiceError::validation(
                "person_id",
                format!("person {} does not exist", id),
            )),
        }
    }
}
