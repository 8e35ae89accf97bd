//! Common repository traits
//!
//! Each repository owns one table. The traits below cover the primary-key
//! operations; anything more specific (joins, filters, partial updates on
//! arrays) lives as an inherent method on the repository itself.

/// Ties a repository to the entity it stores and the type of its primary key.
pub trait Repository {
    type Entity;
    type Id;
}

/// Insert a new row, returning the entity with the identifiers assigned by the
/// database (serial ids, sequence values, default timestamps).
pub trait Create<CreateDTO>: Repository {
    async fn create(&self, data: &CreateDTO) -> Result<Self::Entity, sqlx::Error>;
}

/// Primary-key lookup.
///
/// * `Ok(None)` - no row with that key
/// * `Err(_)` - the query itself failed
pub trait Read: Repository {
    async fn read(&self, id: &Self::Id) -> Result<Option<Self::Entity>, sqlx::Error>;
}

/// Partial update: only the `Some(_)` fields of `UpdateDTO` are written, the
/// others keep their stored value.
///
/// Returns `sqlx::Error::RowNotFound` when the key does not exist.
pub trait Update<UpdateDTO>: Repository {
    async fn update(&self, id: &Self::Id, data: &UpdateDTO) -> Result<Self::Entity, sqlx::Error>;
}

/// Hard delete by primary key. Returns `true` when a row was removed.
pub trait Delete: Repository {
    async fn delete(&self, id: &Self::Id) -> Result<bool, sqlx::Error>;
}
