//! # Use Cases
//!
//! Business rules sitting between the HTTP layer and the repositories.
//!
//! ```text
//! handler ──► GoodsUseCase<R>          ──► GoodRepository
//!         └─► TransactionUseCase<T, G> ──► TransactionRepository
//!                                      └─► GoodRepository (price lookup)
//! ```
//!
//! Use cases are generic over the repository traits and hold them behind
//! `Arc`, so they are cheap to clone into request handlers.

pub mod goods;
pub mod transactions;

pub use goods::GoodsUseCase;
pub use transactions::TransactionUseCase;
