//! User and person services

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rbac_contracts::{Contract, PersonContract, UserContract, ValidationResult, WriteMode};
use rbac_core::config::AppConfig;
use rbac_core::policy::ListFilter;
use rbac_core::result::ServiceResult;
use rbac_db::{PersonRepository, Repository};
use rbac_models::{Person, PersonDto, PersonPatch, User, UserDto, UserPatch};

use crate::crud::CrudService;
use crate::definition::{entity_definition, EntityDefinition};
use crate::guard::PersonExistsGuard;

pub struct UserDefinition;

impl EntityDefinition for UserDefinition {
    type Entity = User;
    type Dto = UserDto;
    type Patch = UserPatch;

    const DEFAULT_LIST_FILTER: ListFilter = ListFilter::ActiveOnly;

    fn validate(dto: &UserDto, mode: WriteMode) -> ValidationResult {
        UserContract::new(mode).validate(dto)
    }

    fn validate_patch(patch: &UserPatch) -> ValidationResult {
        UserContract::new(WriteMode::Update).validate(patch)
    }

    fn new_entity(dto: &UserDto, now: DateTime<Utc>) -> User {
        User::from_dto(dto, now)
    }

    fn apply_update(entity: &mut User, dto: &UserDto) {
        entity.apply_dto(dto);
    }

    fn apply_patch(entity: &mut User, patch: &UserPatch) {
        entity.apply_patch(patch);
    }

    fn to_dto(entity: &User) -> UserDto {
        UserDto::from(entity)
    }
}

/// User accounts. Every write checks that `person_id` names an existing person.
#[derive(Clone)]
pub struct UserService {
    crud: CrudService<UserDefinition>,
}

impl UserService {
    pub fn new(users: Arc<dyn Repository<User>>, persons: Arc<dyn PersonRepository>) -> Self {
        let guard = PersonExistsGuard::new(persons, |user: &User| user.person_id);
        Self {
            crud: CrudService::new(users).with_guard(Arc::new(guard)),
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }
}

impl Deref for UserService {
    type Target = CrudService<UserDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

entity_definition! {
    PersonDefinition {
        entity: Person,
        dto: PersonDto,
        patch: PersonPatch,
        contract: PersonContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

pub type PersonService = CrudService<PersonDefinition>;
