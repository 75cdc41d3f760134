//! Per-entity hooks for the generic CRUD service
//!
//! An [`EntityDefinition`] names the entity, DTO and patch types of one entity
//! kind and supplies the steps that differ between kinds: input contracts,
//! construction, field application and mapping. Everything else lives once in
//! [`CrudService`](crate::crud::CrudService).

use chrono::{DateTime, Utc};
use rbac_contracts::{ValidationResult, WriteMode};
use rbac_core::policy::ListFilter;
use rbac_core::traits::{Dto, Entity};

pub trait EntityDefinition: Send + Sync + 'static {
    type Entity: Entity;
    type Dto: Dto;
    type Patch: Send + Sync + 'static;

    /// Visibility applied by `list` unless configuration overrides it
    const DEFAULT_LIST_FILTER: ListFilter;

    /// Contract for a full DTO on create or update
    fn validate(dto: &Self::Dto, mode: WriteMode) -> ValidationResult;

    /// Contract for the fields present in a patch
    fn validate_patch(patch: &Self::Patch) -> ValidationResult;

    /// Checks that span several fields of the row about to be written
    fn validate_merged(_entity: &Self::Entity) -> ValidationResult {
        Ok(())
    }

    fn new_entity(dto: &Self::Dto, now: DateTime<Utc>) -> Self::Entity;

    fn apply_update(entity: &mut Self::Entity, dto: &Self::Dto);

    fn apply_patch(entity: &mut Self::Entity, patch: &Self::Patch);

    fn to_dto(entity: &Self::Entity) -> Self::Dto;
}

/// Declares a unit struct implementing [`EntityDefinition`] for a model that
/// follows the `from_dto` / `apply_dto` / `apply_patch` / `From<&Entity>`
/// convention, validated by a single contract value.
macro_rules! entity_definition {
    (
        $(#[$meta:meta])*
        $def:ident {
            entity: $entity:ty,
            dto: $dto:ty,
            patch: $patch:ty,
            contract: $contract:expr,
            list_filter: $filter:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $def;

        impl $crate::definition::EntityDefinition for $def {
            type Entity = $entity;
            type Dto = $dto;
            type Patch = $patch;

            const DEFAULT_LIST_FILTER: ::rbac_core::policy::ListFilter = $filter;

            fn validate(
                dto: &$dto,
                _mode: ::rbac_contracts::WriteMode,
            ) -> ::rbac_contracts::ValidationResult {
                ::rbac_contracts::Contract::<$dto>::validate(&$contract, dto)
            }

            fn validate_patch(patch: &$patch) -> ::rbac_contracts::ValidationResult {
                ::rbac_contracts::Contract::<$patch>::validate(&$contract, patch)
            }

            fn new_entity(dto: &$dto, now: ::chrono::DateTime<::chrono::Utc>) -> $entity {
                <$entity>::from_dto(dto, now)
            }

            fn apply_update(entity: &mut $entity, dto: &$dto) {
                entity.apply_dto(dto);
            }

            fn apply_patch(entity: &mut $entity, patch: &$patch) {
                entity.apply_patch(patch);
            }

            fn to_dto(entity: &$entity) -> $dto {
                <$dto>::from(entity)
            }
        }
    };
}

pub(crate) use entity_definition;
