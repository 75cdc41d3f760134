//! In-memory store
//!
//! Rows live in an ordered map behind an async `RwLock`, so `get_all`
//! returns them in id order. Used by the console binary and by tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use rbac_core::traits::{Entity, Id};
use rbac_models::{
    AccessLog, Bill, ModuleForm, Person, RoleFormPermission, RoleUser, StateInfraction,
    UserNotification,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::lookups::*;
use crate::repository::{Repository, RepositoryError, RepositoryResult};

/// Row version given to freshly created rows
const FIRST_VERSION: i64 = 1;

pub struct MemoryRepository<T: Entity> {
    rows: RwLock<BTreeMap<Id, T>>,
    next_id: AtomicI64,
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Store with pre-existing rows, kept under their own ids
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let rows: BTreeMap<Id, T> = rows.into_iter().map(|row| (row.id(), row)).collect();
        let next_id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn scan<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Id) -> RepositoryResult<Option<T>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn create(&self, mut entity: T) -> RepositoryResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        entity.set_id(id);
        entity.set_row_version(FIRST_VERSION);

        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(RepositoryError::Storage(format!(
                "{} id {} already taken",
                T::TYPE_NAME,
                id
            )));
        }
        rows.insert(id, entity.clone());
        debug!(entity = T::TYPE_NAME, id, "Row created");
        Ok(entity)
    }

    async fn update(&self, entity: &T) -> RepositoryResult<bool> {
        let id = entity.id();
        let mut rows = self.rows.write().await;
        let Some(stored) = rows.get_mut(&id) else {
            return Ok(false);
        };

        let current = stored.row_version();
        let expected = entity.row_version();
        if expected != 0 && expected != current {
            return Err(RepositoryError::Conflict {
                entity: T::TYPE_NAME,
                id,
                expected,
                current,
            });
        }

        let created_at = stored.created_at();
        *stored = entity.clone();
        stored.set_created_at(created_at);
        stored.set_row_version(current + 1);
        debug!(entity = T::TYPE_NAME, id, version = current + 1, "Row updated");
        Ok(true)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<bool> {
        let removed = self.rows.write().await.remove(&id).is_some();
        if removed {
            debug!(entity = T::TYPE_NAME, id, "Row deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl PersonRepository for MemoryRepository<Person> {
    async fn person_exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.rows.read().await.contains_key(&id))
    }

    async fn get_by_document_number(
        &self,
        document_number: &str,
    ) -> RepositoryResult<Option<Person>> {
        let wanted = document_number.trim();
        Ok(self
            .scan(|p| p.document_number == wanted)
            .await
            .into_iter()
            .next())
    }
}

#[async_trait]
impl StateInfractionRepository for MemoryRepository<StateInfraction> {
    async fn get_by_person_ids(&self, person_ids: &[Id]) -> RepositoryResult<Vec<StateInfraction>> {
        Ok(self.scan(|i| person_ids.contains(&i.person_id)).await)
    }
}

#[async_trait]
impl UserNotificationRepository for MemoryRepository<UserNotification> {
    async fn get_by_user_id(&self, user_id: Id) -> RepositoryResult<Vec<UserNotification>> {
        Ok(self.scan(|n| n.user_id == user_id).await)
    }
}

#[async_trait]
impl RoleUserRepository for MemoryRepository<RoleUser> {
    async fn get_by_user_id(&self, user_id: Id) -> RepositoryResult<Vec<RoleUser>> {
        Ok(self.scan(|ru| ru.user_id == user_id).await)
    }
}

#[async_trait]
impl RoleFormPermissionRepository for MemoryRepository<RoleFormPermission> {
    async fn get_by_role_id(&self, role_id: Id) -> RepositoryResult<Vec<RoleFormPermission>> {
        Ok(self.scan(|g| g.role_id == role_id).await)
    }
}

#[async_trait]
impl ModuleFormRepository for MemoryRepository<ModuleForm> {
    async fn get_by_module_id(&self, module_id: Id) -> RepositoryResult<Vec<ModuleForm>> {
        Ok(self.scan(|mf| mf.module_id == module_id).await)
    }
}

#[async_trait]
impl BillRepository for MemoryRepository<Bill> {
    async fn get_by_barcode(&self, barcode: &str) -> RepositoryResult<Option<Bill>> {
        let wanted = barcode.trim();
        Ok(self.scan(|b| b.barcode == wanted).await.into_iter().next())
    }
}

#[async_trait]
impl AccessLogRepository for MemoryRepository<AccessLog> {
    async fn get_by_user_id(&self, user_id: Id) -> RepositoryResult<Vec<AccessLog>> {
        let mut logs = self.scan(|l| l.user_id == user_id).await;
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rbac_models::{Role, RoleDto};

    fn role(name: &str) -> Role {
        Role::from_dto(
            &RoleDto {
                role_name: name.to_string(),
                is_active: true,
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_version() {
        let repo = MemoryRepository::<Role>::new();
        let first = repo.create(role("admin")).await.unwrap();
        let second = repo.create(role("auditor")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.row_version, FIRST_VERSION);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let repo = MemoryRepository::<Role>::new();
        let mut saved = repo.create(role("admin")).await.unwrap();

        saved.description = "Full access".to_string();
        assert!(repo.update(&saved).await.unwrap());

        let stored = repo.get_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored.description, "Full access");
        assert_eq!(stored.row_version, FIRST_VERSION + 1);
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let repo = MemoryRepository::<Role>::new();
        let saved = repo.create(role("admin")).await.unwrap();

        let mut first_writer = saved.clone();
        first_writer.role_name = "root".to_string();
        assert!(repo.update(&first_writer).await.unwrap());

        let mut second_writer = saved;
        second_writer.role_name = "superuser".to_string();
        let err = repo.update(&second_writer).await.unwrap_err();
        assert!(err.is_conflict());

        let stored = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.role_name, "root");
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = MemoryRepository::<Role>::new();
        let mut ghost = role("ghost");
        ghost.id = 42;
        assert!(!repo.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = MemoryRepository::<Role>::new();
        let saved = repo.create(role("admin")).await.unwrap();

        let mut changed = saved.clone();
        changed.created_at = Utc::now() + chrono::Duration::days(3);
        assert!(repo.update(&changed).await.unwrap());

        let stored = repo.get_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = MemoryRepository::<Role>::new();
        let saved = repo.create(role("admin")).await.unwrap();
        assert!(repo.delete(saved.id).await.unwrap());
        assert!(!repo.delete(saved.id).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_seeded_rows_keep_ids() {
        let mut seeded = role("admin");
        seeded.id = 10;
        let repo = MemoryRepository::with_rows(vec![seeded]);

        let next = repo.create(role("auditor")).await.unwrap();
        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn test_bill_by_barcode() {
        use rbac_models::BillDto;
        use rust_decimal::Decimal;

        let repo = MemoryRepository::<Bill>::new();
        let bill = Bill::from_dto(
            &BillDto {
                barcode: "7701234567890".to_string(),
                total_value: Decimal::new(1000, 0),
                user_id: 1,
                ..Default::default()
            },
            Utc::now(),
        );
        repo.create(bill).await.unwrap();

        let found = repo.get_by_barcode(" 7701234567890 ").await.unwrap();
        assert!(found.is_some());
        assert!(repo.get_by_barcode("000").await.unwrap().is_none());
    }
}
