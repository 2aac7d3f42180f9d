use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::donations::repo_types::DonationRow;

/// Settlement state of a donation, derived from the presence of its hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Completed,
    Pending,
}

impl DonationStatus {
    pub fn from_hash(hash: Option<&str>) -> Self {
        match hash {
            Some(_) => DonationStatus::Completed,
            None => DonationStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Completed => "completed",
            DonationStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRef {
    pub title: String,
}

/// Wire shape of `GET /api/donations` entries, shared with the payments client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationItem {
    pub donation_id: i64,
    pub user_id: i64,
    pub campaign_id: i64,
    pub amount: Decimal,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub hash: Option<String>,
    pub campaign: CampaignRef,
}

impl DonationItem {
    pub fn status(&self) -> DonationStatus {
        DonationStatus::from_hash(self.hash.as_deref())
    }
}

impl From<DonationRow> for DonationItem {
    fn from(r: DonationRow) -> Self {
        Self {
            donation_id: r.donation_id,
            user_id: r.user_id,
            campaign_id: r.campaign_id,
            amount: r.amount,
            date: r.date,
            hash: r.hash,
            campaign: CampaignRef {
                title: r.campaign_title,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DonationsQuery {
    pub user_id: Option<String>,
}
