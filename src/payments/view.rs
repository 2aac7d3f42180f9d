use rust_decimal::Decimal;
use time::{macros::format_description, OffsetDateTime};
use tracing::{debug, warn};

use crate::donations::dto::{DonationItem, DonationStatus};
use crate::payments::feed::DonationFeed;

pub const CURRENCY: &str = "USDC";
pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No payments found.";

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentsState {
    Loading,
    Ready(Vec<DonationItem>),
}

/// One rendered history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub donation_id: i64,
    pub campaign_title: String,
    pub date: String,
    pub amount: String,
    pub status: DonationStatus,
}

impl PaymentRow {
    pub fn from_item(item: &DonationItem) -> Self {
        Self {
            donation_id: item.donation_id,
            campaign_title: item.campaign.title.clone(),
            date: format_date(item.date),
            amount: format_amount(item.amount),
            status: item.status(),
        }
    }
}

pub fn format_date(date: OffsetDateTime) -> String {
    date.format(format_description!(
        "[month padding:none]/[day padding:none]/[year]"
    ))
    .unwrap_or_else(|_| date.date().to_string())
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{} {}", amount.normalize(), CURRENCY)
}

/// Payments history for the signed-in user.
///
/// Starts in `Loading`. `load` without a user id (or with id 0) does nothing,
/// so the view stays in `Loading`. A failed fetch is logged and shown as an empty history.
pub struct PaymentsView<F> {
    feed: F,
    state: PaymentsState,
}

impl<F: DonationFeed> PaymentsView<F> {
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            state: PaymentsState::Loading,
        }
    }

    pub async fn load(&mut self, user_id: Option<i64>) {
        let Some(user_id) = user_id.filter(|id| *id != 0) else {
            debug!("no authenticated user, skipping donations fetch");
            return;
        };
        let items = match self.feed.donations_for(user_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, user_id, "donations fetch failed");
                Vec::new()
            }
        };
        self.state = PaymentsState::Ready(items);
    }

    pub fn state(&self) -> &PaymentsState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PaymentsState::Loading)
    }

    pub fn rows(&self) -> Vec<PaymentRow> {
        match &self.state {
            PaymentsState::Loading => Vec::new(),
            PaymentsState::Ready(items) => items.iter().map(PaymentRow::from_item).collect(),
        }
    }

    /// Plain-text rendering, one line per payment.
    pub fn render(&self) -> String {
        match &self.state {
            PaymentsState::Loading => LOADING_TEXT.to_string(),
            PaymentsState::Ready(items) if items.is_empty() => EMPTY_TEXT.to_string(),
            PaymentsState::Ready(_) => self
                .rows()
                .iter()
                .map(|r| {
                    format!(
                        "{}\t{}\t{}\t{}",
                        r.campaign_title, r.date, r.amount, r.status
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use time::macros::datetime;

    use super::*;
    use crate::donations::dto::CampaignRef;

    #[derive(Clone, Default)]
    struct CountingFeed {
        calls: Arc<AtomicUsize>,
        items: Vec<DonationItem>,
        fail: bool,
    }

    #[async_trait]
    impl DonationFeed for CountingFeed {
        async fn donations_for(&self, user_id: i64) -> anyhow::Result<Vec<DonationItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self
                .items
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    fn donation(id: i64, title: &str, amount: Decimal, hash: Option<&str>) -> DonationItem {
        DonationItem {
            donation_id: id,
            user_id: 1,
            campaign_id: 10,
            amount,
            date: datetime!(2024-03-05 14:00 UTC),
            hash: hash.map(str::to_string),
            campaign: CampaignRef {
                title: title.into(),
            },
        }
    }

    #[tokio::test]
    async fn no_user_means_no_request() {
        let feed = CountingFeed::default();
        let calls = feed.calls.clone();
        let mut view = PaymentsView::new(feed);

        view.load(None).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(view.is_loading());
        assert_eq!(view.render(), LOADING_TEXT);
    }

    #[tokio::test]
    async fn zero_user_id_means_no_request() {
        let feed = CountingFeed::default();
        let calls = feed.calls.clone();
        let mut view = PaymentsView::new(feed);

        view.load(Some(0)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn renders_rows_with_derived_status() {
        let feed = CountingFeed {
            items: vec![
                donation(1, "Clean Water", Decimal::new(2550, 2), Some("0xabc")),
                donation(2, "Books", Decimal::new(100_000_000, 6), None),
            ],
            ..Default::default()
        };
        let calls = feed.calls.clone();
        let mut view = PaymentsView::new(feed);

        view.load(Some(1)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].campaign_title, "Clean Water");
        assert_eq!(rows[0].date, "3/5/2024");
        assert_eq!(rows[0].amount, "25.5 USDC");
        assert_eq!(rows[0].status, DonationStatus::Completed);
        assert_eq!(rows[1].amount, "100 USDC");
        assert_eq!(rows[1].status, DonationStatus::Pending);
        assert_eq!(
            view.render(),
            "Clean Water\t3/5/2024\t25.5 USDC\tcompleted\nBooks\t3/5/2024\t100 USDC\tpending"
        );
    }

    #[tokio::test]
    async fn empty_history() {
        let mut view = PaymentsView::new(CountingFeed::default());
        view.load(Some(1)).await;
        assert_eq!(view.state(), &PaymentsState::Ready(Vec::new()));
        assert_eq!(view.render(), EMPTY_TEXT);
    }

    #[tokio::test]
    async fn failed_fetch_clears_loading_and_renders_empty() {
        let feed = CountingFeed {
            fail: true,
            ..Default::default()
        };
        let mut view = PaymentsView::new(feed);
        view.load(Some(1)).await;
        assert!(!view.is_loading());
        assert_eq!(view.render(), EMPTY_TEXT);
    }
}
