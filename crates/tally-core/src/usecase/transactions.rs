//! # Transaction Use Case
//!
//! Pricing, validation and orchestration of header + detail writes.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_with_details(date, [DetailInput])                               │
//! │       │                                                                 │
//! │       ├── empty detail list?          → Validation                      │
//! │       │                                                                 │
//! │       ▼  for each line, in order                                        │
//! │  quantity > 0?                        → Validation                      │
//! │  goods.get_by_id(good_id)             → NotFound (names the good)       │
//! │  price_line (catalog price, subtotal) → Validation                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total := Σ subtotal                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  transactions.create_with_details ── one DB transaction ──► header id  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing reaches the transaction repository until every line has been
//! validated and priced.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{CoreError, CoreResult, StoreError};
use crate::pricing::{build_draft, price_line};
use crate::repository::{GoodRepository, TransactionRepository};
use crate::types::{DetailInput, TransactionDraft, TransactionHeader, TransactionWithDetails};
use crate::validation::{validate_detail_count, validate_line_quantity};

/// Transaction business logic over injected transaction and goods repositories.
pub struct TransactionUseCase<T: TransactionRepository, G: GoodRepository> {
    transactions: Arc<T>,
    goods: Arc<G>,
}

impl<T: TransactionRepository, G: GoodRepository> TransactionUseCase<T, G> {
    pub fn new(transactions: Arc<T>, goods: Arc<G>) -> Self {
        TransactionUseCase {
            transactions,
            goods,
        }
    }

    /// Validates, prices and stores a new transaction. Returns the header id.
    #[instrument(skip(self, details), fields(lines = details.len()))]
    pub async fn create_with_details(
        &self,
        date: NaiveDate,
        details: Vec<DetailInput>,
    ) -> CoreResult<String> {
        let draft = self.price(date, &details).await?;
        let total = draft.total;

        let id = self.transactions.create_with_details(draft).await?;

        debug!(%id, %total, "Transaction created");
        Ok(id)
    }

    /// Lists headers ordered by date, without details.
    #[instrument(skip(self))]
    pub async fn list(&self) -> CoreResult<Vec<TransactionHeader>> {
        Ok(self.transactions.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> CoreResult<TransactionWithDetails> {
        self.transactions
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::transaction_not_found(id))
    }

    /// Replaces the date (when supplied) and the full detail set.
    ///
    /// Every line is re-validated and re-priced at the goods' current catalog
    /// prices, so an update can change the total even with identical lines.
    #[instrument(skip(self, details), fields(lines = details.len()))]
    pub async fn update_with_details(
        &self,
        id: &str,
        date: Option<NaiveDate>,
        details: Vec<DetailInput>,
    ) -> CoreResult<TransactionWithDetails> {
        let existing = self.get_by_id(id).await?;
        let date = date.unwrap_or(existing.header.date);

        let draft = self.price(date, &details).await?;

        self.transactions
            .update_with_details(id, draft)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => CoreError::transaction_not_found(id),
                other => CoreError::Persistence(other),
            })
    }

    /// Deletes the header and all of its details.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        self.get_by_id(id).await?;

        self.transactions.delete(id).await.map_err(|e| match e {
            StoreError::NotFound { .. } => CoreError::transaction_not_found(id),
            other => CoreError::Persistence(other),
        })
    }

    async fn price(&self, date: NaiveDate, details: &[DetailInput]) -> CoreResult<TransactionDraft> {
        validate_detail_count(details.len())?;

        let mut lines = Vec::with_capacity(details.len());
        for input in details {
            validate_line_quantity(input.quantity)?;

            let good = self
                .goods
                .get_by_id(&input.good_id)
                .await?
                .ok_or_else(|| CoreError::good_not_found(input.good_id.as_str()))?;

            lines.push(price_line(input, &good)?);
        }

        Ok(build_draft(date, lines)?)
    }
}

impl<T: TransactionRepository, G: GoodRepository> Clone for TransactionUseCase<T, G> {
    fn clone(&self) -> Self {
        TransactionUseCase {
            transactions: Arc::clone(&self.transactions),
            goods: Arc::clone(&self.goods),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::repository::{MockGoodRepository, MockTransactionRepository};
    use crate::types::{DetailDraft, Good, TransactionDetail};
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> MockGoodRepository {
        let mut goods = MockGoodRepository::new();
        goods.expect_get_by_id().returning(|id| {
            let cents = match id {
                "widget" => 250,
                "gadget" => 199,
                "freebie" => 0,
                _ => return Ok(None),
            };
            Ok(Some(Good {
                id: id.to_string(),
                name: id.to_string(),
                quantity: 100,
                price: Money::from_cents(cents),
            }))
        });
        goods
    }

    fn line(good_id: &str, quantity: i64) -> DetailInput {
        DetailInput {
            good_id: good_id.to_string(),
            quantity,
            unit_price: None,
        }
    }

    fn stored(id: &str, draft: &TransactionDraft) -> TransactionWithDetails {
        TransactionWithDetails {
            header: TransactionHeader {
                id: id.to_string(),
                date: draft.date,
                total: draft.total,
            },
            details: draft
                .details
                .iter()
                .enumerate()
                .map(|(i, d)| TransactionDetail {
                    id: format!("{}-d{}", id, i + 1),
                    header_id: id.to_string(),
                    good_id: d.good_id.clone(),
                    line_no: i as i64 + 1,
                    quantity: d.quantity,
                    unit_price: d.unit_price,
                    subtotal: d.subtotal,
                })
                .collect(),
        }
    }

    fn use_case(
        transactions: MockTransactionRepository,
        goods: MockGoodRepository,
    ) -> TransactionUseCase<MockTransactionRepository, MockGoodRepository> {
        TransactionUseCase::new(Arc::new(transactions), Arc::new(goods))
    }

    #[tokio::test]
    async fn test_create_single_line_computes_subtotal_and_total() {
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_create_with_details()
            .withf(|draft| {
                draft.date == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    && draft.total.cents() == 750
                    && draft.details.len() == 1
                    && draft.details[0].unit_price.cents() == 250
                    && draft.details[0].subtotal.cents() == 750
            })
            .times(1)
            .returning(|_| Ok("t-1".to_string()));

        let id = use_case(transactions, catalog())
            .create_with_details(date(2024, 1, 1), vec![line("widget", 3)])
            .await
            .unwrap();

        assert_eq!(id, "t-1");
    }

    #[tokio::test]
    async fn test_create_total_is_sum_of_lines() {
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_create_with_details()
            .withf(|draft| draft.total.cents() == 2 * 250 + 5 * 199)
            .returning(|_| Ok("t-1".to_string()));

        use_case(transactions, catalog())
            .create_with_details(date(2024, 3, 9), vec![line("widget", 2), line("gadget", 5)])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_ignores_client_unit_price() {
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_create_with_details()
            .withf(|draft| draft.details[0].unit_price.cents() == 250)
            .returning(|_| Ok("t-1".to_string()));

        let mut input = line("widget", 1);
        input.unit_price = Some(Money::from_cents(1));

        use_case(transactions, catalog())
            .create_with_details(date(2024, 1, 1), vec![input])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_empty_details_persists_nothing() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_create_with_details().never();
        let mut goods = MockGoodRepository::new();
        goods.expect_get_by_id().never();

        let err = use_case(transactions, goods)
            .create_with_details(date(2024, 1, 1), vec![])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Empty { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_unknown_good_names_the_good() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_create_with_details().never();

        let err = use_case(transactions, catalog())
            .create_with_details(date(2024, 1, 1), vec![line("widget", 1), line("ghost", 1)])
            .await
            .unwrap_err();

        match err {
            CoreError::NotFound { entity, id } => {
                assert_eq!(entity, "Good");
                assert_eq!(id, "ghost");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_zero_quantity_before_lookup() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_create_with_details().never();
        let mut goods = MockGoodRepository::new();
        goods.expect_get_by_id().never();

        let err = use_case(transactions, goods)
            .create_with_details(date(2024, 1, 1), vec![line("widget", 0)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_good_with_zero_price() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_create_with_details().never();

        let err = use_case(transactions, catalog())
            .create_with_details(date(2024, 1, 1), vec![line("freebie", 1)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_storage_failure_is_persistence_error() {
        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_create_with_details()
            .returning(|_| Err(StoreError::Failed("commit failed".to_string())));

        let err = use_case(transactions, catalog())
            .create_with_details(date(2024, 1, 1), vec![line("widget", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_get_by_id().returning(|_| Ok(None));

        let err = use_case(transactions, MockGoodRepository::new())
            .get_by_id("t-404")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::NotFound {
                entity: "Transaction",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_list_empty_is_ok() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_list().returning(|| Ok(vec![]));

        let headers = use_case(transactions, MockGoodRepository::new())
            .list()
            .await
            .unwrap();
        assert!(headers.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_date_when_omitted() {
        let original = TransactionDraft {
            date: date(2024, 1, 1),
            total: Money::from_cents(250),
            details: vec![],
        };
        let existing = stored("t-1", &original);

        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_get_by_id()
            .with(eq("t-1"))
            .returning(move |_| Ok(Some(existing.clone())));
        transactions
            .expect_update_with_details()
            .withf(|id, draft| {
                id == "t-1"
                    && draft.date == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    && draft.total.cents() == 4 * 199
            })
            .returning(|id, draft| Ok(stored(id, &draft)));

        let updated = use_case(transactions, catalog())
            .update_with_details("t-1", None, vec![line("gadget", 4)])
            .await
            .unwrap();

        assert_eq!(updated.header.date, date(2024, 1, 1));
        assert_eq!(updated.header.total.cents(), 796);
        assert_eq!(updated.details.len(), 1);
        assert_eq!(updated.details[0].good_id, "gadget");
    }

    #[tokio::test]
    async fn test_update_replaces_date_when_supplied() {
        let existing = stored(
            "t-1",
            &TransactionDraft {
                date: date(2024, 1, 1),
                total: Money::from_cents(250),
                details: vec![],
            },
        );

        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        transactions
            .expect_update_with_details()
            .returning(|id, draft| Ok(stored(id, &draft)));

        let updated = use_case(transactions, catalog())
            .update_with_details("t-1", Some(date(2024, 2, 29)), vec![line("widget", 1)])
            .await
            .unwrap();

        assert_eq!(updated.header.date, date(2024, 2, 29));
    }

    #[tokio::test]
    async fn test_update_unknown_header_is_not_found() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_get_by_id().returning(|_| Ok(None));
        transactions.expect_update_with_details().never();

        let err = use_case(transactions, catalog())
            .update_with_details("t-404", None, vec![line("widget", 1)])
            .await
            .unwrap_err();

        match err {
            CoreError::NotFound { id, .. } => assert_eq!(id, "t-404"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_with_empty_details_is_rejected() {
        let existing = stored(
            "t-1",
            &TransactionDraft {
                date: date(2024, 1, 1),
                total: Money::zero(),
                details: vec![],
            },
        );

        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        transactions.expect_update_with_details().never();

        let err = use_case(transactions, catalog())
            .update_with_details("t-1", None, vec![])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
    }

    fn existing_with_widget() -> TransactionWithDetails {
        stored(
            "t-1",
            &TransactionDraft {
                date: date(2024, 1, 1),
                total: Money::from_cents(250),
                details: vec![DetailDraft {
                    good_id: "widget".to_string(),
                    quantity: 1,
                    unit_price: Money::from_cents(250),
                    subtotal: Money::from_cents(250),
                }],
            },
        )
    }

    #[tokio::test]
    async fn test_update_unknown_good_is_not_found() {
        let existing = existing_with_widget();

        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        transactions.expect_update_with_details().never();

        let err = use_case(transactions, catalog())
            .update_with_details("t-1", None, vec![line("widget", 1), line("ghost", 1)])
            .await
            .unwrap_err();

        match err {
            CoreError::NotFound { entity, id } => {
                assert_eq!(entity, "Good");
                assert_eq!(id, "ghost");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_zero_quantity_is_rejected() {
        let existing = existing_with_widget();

        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        transactions.expect_update_with_details().never();
        let mut goods = MockGoodRepository::new();
        goods.expect_get_by_id().never();

        let err = use_case(transactions, goods)
            .update_with_details("t-1", None, vec![line("widget", 0)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let mut transactions = MockTransactionRepository::new();
        transactions.expect_get_by_id().returning(|_| Ok(None));
        transactions.expect_delete().never();

        assert!(matches!(
            use_case(transactions, MockGoodRepository::new())
                .delete("t-404")
                .await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let existing = stored(
            "t-1",
            &TransactionDraft {
                date: date(2024, 1, 1),
                total: Money::zero(),
                details: vec![],
            },
        );

        let mut transactions = MockTransactionRepository::new();
        transactions
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        transactions
            .expect_delete()
            .with(eq("t-1"))
            .times(1)
            .returning(|_| Ok(()));

        use_case(transactions, MockGoodRepository::new())
            .delete("t-1")
            .await
            .unwrap();
    }
}
