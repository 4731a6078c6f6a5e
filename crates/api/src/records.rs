//! Authenticated, owner-scoped access to saved records.
//!
//! [`RecordAccessGateway`] resolves the caller through an
//! [`IdentityProvider`] and reads through a [`RecordStore`]. Ownership is
//! enforced by the store query itself (`id` and `user_id` in one
//! predicate), never by inspecting a fetched row.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use certgen_core::error::CoreError;
use certgen_db::models::certificate::CertificateRecord;
use certgen_db::models::template::Template;
use certgen_db::repositories::{CertificateRepo, TemplateRepo};
use certgen_db::DbPool;
use uuid::Uuid;

use crate::auth::identity::{IdentityError, IdentityProvider};

/// Read access to the backing store, always scoped to one owner.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The certificate `id`, only if it belongs to `user_id`.
    async fn find_certificate(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CertificateRecord>, sqlx::Error>;

    async fn list_certificates(&self, user_id: Uuid) -> Result<Vec<CertificateRecord>, sqlx::Error>;

    async fn list_templates(&self, user_id: Uuid) -> Result<Vec<Template>, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// [`RecordStore`] backed by Postgres through the service-credential pool.
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_certificate(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CertificateRecord>, sqlx::Error> {
        CertificateRepo::find_owned(&self.pool, user_id, id).await
    }

    async fn list_certificates(&self, user_id: Uuid) -> Result<Vec<CertificateRecord>, sqlx::Error> {
        CertificateRepo::list_for_user(&self.pool, user_id).await
    }

    async fn list_templates(&self, user_id: Uuid) -> Result<Vec<Template>, sqlx::Error> {
        TemplateRepo::list_for_user(&self.pool, user_id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        certgen_db::health_check(&self.pool).await
    }
}

/// Authenticates callers and reads the records they own.
pub struct RecordAccessGateway {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn RecordStore>,
    deadline: Duration,
}

impl RecordAccessGateway {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn RecordStore>,
        deadline: Duration,
    ) -> Self {
        Self {
            identity,
            store,
            deadline,
        }
    }

    /// Resolve a bearer token to a user id.
    ///
    /// A missing token is rejected without contacting the identity service.
    /// Every rejection looks the same to the caller; only a deadline
    /// overrun is reported differently.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<Uuid, CoreError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::Unauthenticated("Missing bearer token".into()))?;

        match tokio::time::timeout(self.deadline, self.identity.authenticate(token)).await {
            Ok(Ok(user_id)) => Ok(user_id),
            Ok(Err(IdentityError::Timeout)) | Err(_) => {
                tracing::error!("Identity service call timed out");
                Err(CoreError::Timeout {
                    service: "identity service",
                })
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Bearer token rejected");
                Err(CoreError::Unauthenticated(
                    "Invalid or expired token".into(),
                ))
            }
        }
    }

    /// Fetch one certificate owned by the bearer of `token`.
    ///
    /// Checks run in order: token present, token valid, id present, owned
    /// row exists. An unparsable id, a row owned by someone else and a
    /// store failure all surface as [`CoreError::NotFound`].
    pub async fn fetch_certificate(
        &self,
        token: Option<&str>,
        id: Option<&str>,
    ) -> Result<CertificateRecord, CoreError> {
        let user_id = self.authenticate(token).await?;

        let raw_id = id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(CoreError::MissingIdentifier)?;

        let not_found = || CoreError::NotFound {
            entity: "Certificate",
        };

        let Ok(certificate_id) = Uuid::parse_str(raw_id) else {
            tracing::debug!(%user_id, id = raw_id, "Certificate id is not a UUID");
            return Err(not_found());
        };

        let lookup = self.store.find_certificate(user_id, certificate_id);
        match tokio::time::timeout(self.deadline, lookup).await {
            Ok(Ok(Some(record))) => Ok(record),
            Ok(Ok(None)) => {
                tracing::debug!(%user_id, %certificate_id, "No owned certificate");
                Err(not_found())
            }
            Ok(Err(e)) => {
                tracing::error!(%user_id, %certificate_id, error = %e, "Certificate lookup failed");
                Err(not_found())
            }
            Err(_) => {
                tracing::error!(%user_id, %certificate_id, "Certificate lookup timed out");
                Err(CoreError::Timeout {
                    service: "record store",
                })
            }
        }
    }

    /// List the caller's certificates, newest first.
    pub async fn list_certificates(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CertificateRecord>, CoreError> {
        let query = self.store.list_certificates(user_id);
        self.bounded("certificates", query).await
    }

    /// List the caller's templates, newest first.
    pub async fn list_templates(&self, user_id: Uuid) -> Result<Vec<Template>, CoreError> {
        let query = self.store.list_templates(user_id);
        self.bounded("templates", query).await
    }

    /// Whether the store answers a trivial query within the deadline.
    pub async fn store_healthy(&self) -> bool {
        matches!(
            tokio::time::timeout(self.deadline, self.store.health_check()).await,
            Ok(Ok(()))
        )
    }

    /// Run a listing query under the store deadline.
    async fn bounded<T>(
        &self,
        listing: &'static str,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, CoreError> {
        match tokio::time::timeout(self.deadline, query).await {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(e)) => {
                tracing::error!(listing, error = %e, "Record listing failed");
                Err(CoreError::Internal(format!("listing {listing} failed: {e}")))
            }
            Err(_) => {
                tracing::error!(listing, "Record listing timed out");
                Err(CoreError::Timeout {
                    service: "record store",
                })
            }
        }
    }
}
