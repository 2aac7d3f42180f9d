use rust_decimal::Decimal;
use sqlx::FromRow;
use time::OffsetDateTime;

/// A donation joined with the title of its campaign.
#[derive(Debug, Clone, FromRow)]
pub struct DonationRow {
    pub donation_id: i64,
    pub user_id: i64,
    pub campaign_id: i64,
    pub amount: Decimal,
    pub date: OffsetDateTime,
    pub hash: Option<String>,
    pub campaign_title: String,
}
