//! Prints a user's payments history fetched from a running API.
//!
//! `PEVI_API_URL` selects the server, `PEVI_USER_ID` the user. Without a user
//! id nothing is fetched and the view stays in its loading state.

use std::io::Write;

use pevi::{
    config::ClientConfig,
    payments::{HttpDonationFeed, PaymentsView},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("pevi=info");

    let config = ClientConfig::from_env()?;
    let mut view = PaymentsView::new(HttpDonationFeed::new(&config.api_url));
    view.load(config.user_id).await;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", view.render())?;
    Ok(())
}
