use std::sync::Arc;

use sqlx::PgPool;

use crate::assessment::attempts::AttemptStore;
use crate::auth::TokenVerifier;
use crate::generator::AssessmentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// In-flight assessment attempts. Default: Redis.
    pub attempts: Arc<dyn AttemptStore>,
    /// Resolves bearer tokens against the hosted auth provider.
    pub auth: Arc<dyn TokenVerifier>,
    /// Recruiter assessment generator. Default: CatalogGenerator.
    pub generator: Arc<dyn AssessmentGenerator>,
}

#[cfg(test)]
impl AppState {
    /// State over `db` with in-memory attempts, no accepted tokens and an instant generator.
    pub fn for_tests(db: PgPool) -> Self {
        use crate::assessment::attempts::MemoryAttemptStore;
        use crate::auth::FixedTokenVerifier;
        use crate::generator::CatalogGenerator;

        Self {
            db,
            attempts: Arc::new(MemoryAttemptStore::default()),
            auth: Arc::new(FixedTokenVerifier::default()),
            generator: Arc::new(CatalogGenerator::new(std::time::Duration::ZERO)),
        }
    }
}
