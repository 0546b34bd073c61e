//! # Tally POS API
//!
//! JSON HTTP server over the goods and transaction use cases.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Routes                                      │
//! │                                                                         │
//! │  /health                               GET                             │
//! │                                                                         │
//! │  /api/v1/goods                         GET  POST                       │
//! │  /api/v1/goods/{id}                    GET  PUT  DELETE                │
//! │  /api/v1/goods/by-name/{name}          GET                             │
//! │                                                                         │
//! │  /api/v1/transactions                  GET  POST                       │
//! │  /api/v1/transactions/{id}             GET  PUT  DELETE                │
//! │                                                                         │
//! │  Every request is traced (tower-http TraceLayer).                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`] for the environment variables.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tally_core::{GoodsUseCase, TransactionUseCase};
use tally_db::{Database, SqliteGoodRepository, SqliteTransactionRepository};
use tower_http::trace::TraceLayer;

use crate::handlers::{goods, health, transactions};

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};

/// Goods use case over SQLite.
pub type Goods = GoodsUseCase<SqliteGoodRepository>;

/// Transaction use case over SQLite.
pub type Transactions = TransactionUseCase<SqliteTransactionRepository, SqliteGoodRepository>;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub goods: Goods,
    pub transactions: Transactions,
}

impl AppState {
    /// Wires the use cases to repositories over one pool.
    pub fn new(db: Database) -> Self {
        let goods_repo = Arc::new(db.goods());
        let transactions_repo = Arc::new(db.transactions());

        AppState {
            goods: GoodsUseCase::new(Arc::clone(&goods_repo)),
            transactions: TransactionUseCase::new(transactions_repo, goods_repo),
            db,
        }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/goods",
            get(goods::list_goods).post(goods::create_good),
        )
        .route(
            "/goods/{id}",
            get(goods::get_good)
                .put(goods::update_good)
                .delete(goods::delete_good),
        )
        .route("/goods/by-name/{name}", get(goods::get_good_by_name))
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
}
