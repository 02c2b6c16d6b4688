//! Server state
//!
//! [`ServerState`] holds the shared handles every handler needs: the
//! configuration, the store handle, the JWT service and the per-user cart
//! lock registry. It is `Clone` (all members are shallow handles) and is
//! the axum router state.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::carts::CartLocks;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::UserRepository;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT service (shared ownership)
    pub jwt_service: Arc<JwtService>,
    /// Per-user cart mutation locks
    pub cart_locks: Arc<CartLocks>,
}

impl ServerState {
    /// Initialize the server state: working directories, database,
    /// services and the optional seed admin. A database failure here is
    /// fatal for the process (the caller propagates it out of `main`).
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::Internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("canteen.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let cart_locks = Arc::new(CartLocks::new());

        let state = Self {
            config: config.clone(),
            db,
            jwt_service,
            cart_locks,
        };

        state.seed_admin().await?;

        Ok(state)
    }

    /// Create the configured admin account if it does not exist yet
    async fn seed_admin(&self) -> Result<(), AppError> {
        let (Some(email), Some(password)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        let repo = UserRepository::new(self.get_db());
        let admin = repo.ensure_admin(email, password).await?;
        tracing::info!(email = %admin.email, "Admin account available");
        Ok(())
    }

    /// Get a database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Get the cart lock registry
    pub fn cart_locks(&self) -> Arc<CartLocks> {
        self.cart_locks.clone()
    }
}
