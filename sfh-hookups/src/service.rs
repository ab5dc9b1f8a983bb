//! Hookup orchestration service
//!
//! Coordinates repository writes with monitoring registration.
//!
//! Registration is a precondition for a record's existence: `create` undoes
//! its own save when registration fails, and `update` registers a new
//! endpoint before anything is written. Deregistration on `delete` is
//! advisory and its failure never reaches the caller.
//!
//! There is no cross-store transaction. A crash between a failed registration
//! and the compensating delete leaves the record behind, and concurrent
//! readers may observe a record that is about to be compensated away.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::db::HookupRepository;
use crate::error::HookupError;
use crate::models::{Hookup, HookupId, NewHookup, UtilityType};
use crate::monitoring::MonitoringGateway;

/// Stateless coordination of repository and monitoring calls
#[derive(Clone)]
pub struct HookupService {
    repository: Arc<dyn HookupRepository>,
    monitoring: Arc<dyn MonitoringGateway>,
}

impl HookupService {
    pub fn new(
        repository: Arc<dyn HookupRepository>,
        monitoring: Arc<dyn MonitoringGateway>,
    ) -> Self {
        Self {
            repository,
            monitoring,
        }
    }

    /// Create a hookup and register its endpoint with monitoring
    ///
    /// On registration failure the saved record is removed again and the
    /// call fails with `EndpointConfiguration`.
    pub async fn create(
        &self,
        name: &str,
        utility_type: &str,
        endpoint: &str,
    ) -> Result<Hookup, HookupError> {
        let utility_type: UtilityType = utility_type.parse()?;

        let hookup = self
            .repository
            .save(NewHookup::new(name, utility_type, endpoint))
            .await?;

        if let Err(e) = self
            .monitoring
            .register_endpoint(&hookup.id, &hookup.endpoint)
            .await
        {
            warn!(
                id = %hookup.id,
                endpoint = %hookup.endpoint,
                "Monitoring registration failed, removing new hookup: {}",
                e
            );

            if let Err(e) = self.repository.remove(&hookup.id).await {
                error!(
                    id = %hookup.id,
                    "Compensating delete failed, hookup left without monitoring: {}",
                    e
                );
            }

            return Err(HookupError::EndpointConfiguration(hookup.endpoint));
        }

        info!(id = %hookup.id, name = %hookup.name, "Created hookup");
        Ok(hookup)
    }

    pub async fn get(&self, id: &HookupId) -> Result<Option<Hookup>, HookupError> {
        self.repository.find_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<Hookup>, HookupError> {
        self.repository.find_all().await
    }

    /// Update name and/or endpoint
    ///
    /// A changed endpoint is registered before the record is persisted, so a
    /// registration failure leaves the repository untouched.
    pub async fn update(
        &self,
        id: &HookupId,
        name: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Hookup, HookupError> {
        if name.is_none() && endpoint.is_none() {
            return Err(HookupError::NothingToUpdate);
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(HookupError::NotFound)?;

        if let Some(new_endpoint) = endpoint.as_deref() {
            if new_endpoint != current.endpoint {
                if let Err(e) = self
                    .monitoring
                    .register_endpoint(&current.id, new_endpoint)
                    .await
                {
                    warn!(
                        id = %current.id,
                        endpoint = %new_endpoint,
                        "Monitoring registration failed, hookup not updated: {}",
                        e
                    );
                    return Err(HookupError::EndpointConfiguration(new_endpoint.to_string()));
                }
            }
        }

        let merged = Hookup {
            name: name.unwrap_or_else(|| current.name.clone()),
            endpoint: endpoint.unwrap_or_else(|| current.endpoint.clone()),
            ..current
        };

        let updated = self.repository.update(&merged).await?;
        info!(id = %updated.id, "Updated hookup");
        Ok(updated)
    }

    /// Delete a hookup
    ///
    /// Monitoring is told to disconnect first; that call is best-effort.
    pub async fn delete(&self, id: &HookupId) -> Result<(), HookupError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(HookupError::NotFound)?;

        if let Err(e) = self.monitoring.disconnect_endpoint(&current.endpoint).await {
            warn!(
                id = %current.id,
                endpoint = %current.endpoint,
                "Monitoring disconnect failed, deleting anyway: {}",
                e
            );
        }

        self.repository.remove(&current.id).await?;
        info!(id = %current.id, "Deleted hookup");
        Ok(())
    }
}
