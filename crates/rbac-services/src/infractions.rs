//! Infraction services

use std::ops::Deref;
use std::sync::Arc;

use rbac_contracts::{
    InformationInfractionContract, StateInfractionContract, TypeInfractionContract,
    ValidationErrors,
};
use rbac_core::config::AppConfig;
use rbac_core::policy::ListFilter;
use rbac_core::result::ServiceResult;
use rbac_core::traits::Entity;
use rbac_db::{PersonRepository, Repository, StateInfractionRepository};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use rbac_models::{
    InformationInfraction, InformationInfractionDto, InformationInfractionPatch, Person,
    StateInfraction, StateInfractionDto, StateInfractionPatch, TypeInfraction, TypeInfractionDto,
    TypeInfractionPatch,
};

use crate::crud::CrudService;
use crate::definition::{entity_definition, EntityDefinition};
use crate::guard::ActivePersonGuard;

entity_definition! {
    StateInfractionDefinition {
        entity: StateInfraction,
        dto: StateInfractionDto,
        patch: StateInfractionPatch,
        contract: StateInfractionContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

entity_definition! {
    TypeInfractionDefinition {
        entity: TypeInfraction,
        dto: TypeInfractionDto,
        patch: TypeInfractionPatch,
        contract: TypeInfractionContract,
        list_filter: ListFilter::All,
    }
}

entity_definition! {
    InformationInfractionDefinition {
        entity: InformationInfraction,
        dto: InformationInfractionDto,
        patch: InformationInfractionPatch,
        contract: InformationInfractionContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

pub type TypeInfractionService = CrudService<TypeInfractionDefinition>;

/// Recorded infractions. Writes require the referenced person to exist and be active.
#[derive(Clone)]
pub struct StateInfractionService {
    crud: CrudService<StateInfractionDefinition>,
    infractions: Arc<dyn StateInfractionRepository>,
    persons: Arc<dyn PersonRepository>,
}

impl StateInfractionService {
    pub fn new<R, P>(infractions: Arc<R>, persons: Arc<P>) -> Self
    where
        R: Repository<StateInfraction> + StateInfractionRepository + 'static,
        P: Repository<Person> + PersonRepository + 'static,
    {
        let guard = ActivePersonGuard::new(persons.clone(), |i: &StateInfraction| i.person_id);
        Self {
            crud: CrudService::new(infractions.clone()).with_guard(Arc::new(guard)),
            infractions,
            persons,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Infractions of the person holding `document_number`.
    ///
    /// An unknown document yields an empty list.
    #[instrument(skip(self))]
    pub async fn get_by_document_number(
        &self,
        document_number: &str,
    ) -> ServiceResult<Vec<StateInfractionDto>> {
        let document_number = document_number.trim();
        if document_number.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("document_number", "can't be blank");
            return Err(self.crud.invalid(errors));
        }

        let person = self
            .persons
            .get_by_document_number(document_number)
            .await
            .map_err(|e| self.crud.store_failure("get_by_document_number", e))?;
        let Some(person) = person else {
            debug!(document_number, "No person holds document");
            return Ok(Vec::new());
        };

        let rows = self
            .infractions
            .get_by_person_ids(&[person.id])
            .await
            .map_err(|e| self.crud.store_failure("get_by_document_number", e))?;
        let filter = self.crud.list_filter();
        Ok(rows
            .iter()
            .filter(|row| filter.admits(row.active_flag()))
            .map(StateInfractionDefinition::to_dto)
            .collect())
    }
}

impl Deref for StateInfractionService {
    type Target = CrudService<StateInfractionDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

/// Yearly fine parameters
#[derive(Clone)]
pub struct InformationInfractionService {
    crud: CrudService<InformationInfractionDefinition>,
}

impl InformationInfractionService {
    pub fn new(repo: Arc<dyn Repository<InformationInfraction>>) -> Self {
        Self {
            crud: CrudService::new(repo),
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Fine for `smldv_count` units priced with the year's active parameters.
    ///
    /// When several active rows cover the year the most recently created wins.
    #[instrument(skip(self))]
    pub async fn fine_for(&self, year: i32, smldv_count: i32) -> ServiceResult<Decimal> {
        if smldv_count < 0 {
            let mut errors = ValidationErrors::new();
            errors.add("smldv_count", "must be greater than or equal to 0");
            return Err(self.crud.invalid(errors));
        }

        let rows = self
            .crud
            .repository()
            .get_all()
            .await
            .map_err(|e| self.crud.store_failure("fine_for", e))?;
        let parameters = rows
            .iter()
            .filter(|row| row.is_active && row.year == year)
            .max_by_key(|row| row.id);

        let Some(parameters) = parameters else {
            let mut errors = ValidationErrors::new();
            errors.add("year", format!("has no active fine parameters for {}", year));
            return Err(self.crud.invalid(errors));
        };

        parameters.fine_for(smldv_count).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add("smldv_count", "fine amount is out of range");
            self.crud.invalid(errors)
        })
    }
}

impl Deref for InformationInfractionService {
    type Target = CrudService<InformationInfractionDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}
