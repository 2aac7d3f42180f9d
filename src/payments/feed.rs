use async_trait::async_trait;
use tracing::debug;

use crate::donations::dto::DonationItem;

/// Source of a user's donation records.
#[async_trait]
pub trait DonationFeed: Send + Sync {
    async fn donations_for(&self, user_id: i64) -> anyhow::Result<Vec<DonationItem>>;
}

/// Reads `GET {base}/api/donations?user_id=<id>`.
#[derive(Clone)]
pub struct HttpDonationFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDonationFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/donations", self.base_url)
    }
}

#[async_trait]
impl DonationFeed for HttpDonationFeed {
    async fn donations_for(&self, user_id: i64) -> anyhow::Result<Vec<DonationItem>> {
        let url = self.endpoint();
        debug!(%url, user_id, "fetching donations");
        let items = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<DonationItem>>()
            .await?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let feed = HttpDonationFeed::new("http://localhost:8080/");
        assert_eq!(feed.endpoint(), "http://localhost:8080/api/donations");
    }
}
