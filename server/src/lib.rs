//! Canteen Server - campus food-ordering backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): RESTful routes for menu, cart, orders, auth
//! - **Database** (`db`): embedded SurrealDB store + repositories
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **Carts** (`carts`): per-user serialized cart mutations
//! - **Checkout** (`checkout`): order placement workflow
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # Config, state, run loop
//! ├── auth/          # JWT auth, admin capability check
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Models and repositories
//! ├── carts/         # Cart mutation service
//! ├── checkout/      # Order placement workflow
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod carts;
pub mod checkout;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use carts::{CartLocks, CartService};
pub use checkout::CheckoutService;
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
