//! Shared fakes for sfh-hookups integration tests
//!
//! The repository is the real SQLite one on an in-memory database, wrapped so
//! that writes are logged and removal can be made to fail. Monitoring and
//! identity are in-process fakes.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sfh_hookups::api::auth::{AccessLevel, AuthError, Credentials, IdentityVerifier};
use sfh_hookups::db::{connect_in_memory, HookupRepository, SqliteHookupRepository};
use sfh_hookups::models::{Hookup, HookupId, NewHookup};
use sfh_hookups::monitoring::{MonitoringError, MonitoringGateway};
use sfh_hookups::{build_router, AppState, HookupError, HookupService};

/// Ordered log of repository writes and monitoring calls
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub struct LoggingRepository {
    inner: SqliteHookupRepository,
    log: CallLog,
    pub fail_remove: AtomicBool,
}

#[async_trait]
impl HookupRepository for LoggingRepository {
    async fn save(&self, hookup: NewHookup) -> Result<Hookup, HookupError> {
        self.log.lock().unwrap().push(format!("save {}", hookup.name));
        self.inner.save(hookup).await
    }

    async fn find_by_id(&self, id: &HookupId) -> Result<Option<Hookup>, HookupError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Hookup>, HookupError> {
        self.inner.find_all().await
    }

    async fn update(&self, hookup: &Hookup) -> Result<Hookup, HookupError> {
        self.log.lock().unwrap().push(format!("update {}", hookup.id));
        self.inner.update(hookup).await
    }

    async fn remove(&self, id: &HookupId) -> Result<(), HookupError> {
        self.log.lock().unwrap().push(format!("remove {}", id));
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(HookupError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.remove(id).await
    }
}

pub struct FakeMonitoring {
    log: CallLog,
    pub fail_register: AtomicBool,
    pub fail_disconnect: AtomicBool,
}

#[async_trait]
impl MonitoringGateway for FakeMonitoring {
    async fn register_endpoint(&self, id: &HookupId, endpoint: &str) -> Result<(), MonitoringError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("register {} {}", id, endpoint));
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(MonitoringError::Status(503));
        }
        Ok(())
    }

    async fn disconnect_endpoint(&self, endpoint: &str) -> Result<(), MonitoringError> {
        self.log.lock().unwrap().push(format!("disconnect {}", endpoint));
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(MonitoringError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Identity fake keyed on the bearer token
///
/// `Bearer admin` passes both levels, `Bearer user` passes reads only, any
/// other token is rejected with 401.
pub struct FakeIdentity;

#[async_trait]
impl IdentityVerifier for FakeIdentity {
    async fn verify(&self, credentials: &Credentials, level: AccessLevel) -> Result<(), AuthError> {
        match (credentials.authorization.as_str(), level) {
            ("Bearer admin", _) | ("Bearer user", AccessLevel::User) => Ok(()),
            ("Bearer user", AccessLevel::Admin) => Err(AuthError::Rejected {
                status: 403,
                body: json!({ "message": "Admin privileges required" }),
            }),
            _ => Err(AuthError::Rejected {
                status: 401,
                body: json!({ "message": "Invalid token" }),
            }),
        }
    }
}

pub struct Harness {
    pub service: HookupService,
    pub repository: Arc<LoggingRepository>,
    pub monitoring: Arc<FakeMonitoring>,
    log: CallLog,
}

impl Harness {
    pub async fn new() -> Self {
        let pool = connect_in_memory()
            .await
            .expect("Failed to create in-memory database");
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));

        let repository = Arc::new(LoggingRepository {
            inner: SqliteHookupRepository::new(pool),
            log: log.clone(),
            fail_remove: AtomicBool::new(false),
        });
        let monitoring = Arc::new(FakeMonitoring {
            log: log.clone(),
            fail_register: AtomicBool::new(false),
            fail_disconnect: AtomicBool::new(false),
        });

        let service = HookupService::new(repository.clone(), monitoring.clone());

        Self {
            service,
            repository,
            monitoring,
            log,
        }
    }

    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.service.clone(), Arc::new(FakeIdentity)))
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().unwrap().clear();
    }

    pub fn fail_registration(&self, fail: bool) {
        self.monitoring.fail_register.store(fail, Ordering::SeqCst);
    }

    pub fn fail_disconnect(&self, fail: bool) {
        self.monitoring.fail_disconnect.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.repository.fail_remove.store(fail, Ordering::SeqCst);
    }

    pub async fn stored(&self) -> Vec<Hookup> {
        self.repository.find_all().await.unwrap()
    }
}
