use pevi::{
    app::build_app,
    donations::dto::DonationStatus,
    memory::InMemoryDonations,
    payments::{DonationFeed, HttpDonationFeed, PaymentsView},
    state::AppState,
};
use rust_decimal::Decimal;
use time::macros::datetime;

async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn seeded_state() -> AppState {
    let donations = InMemoryDonations::default();
    let water = donations.add_campaign("Clean Water");
    donations.add_donation(
        7,
        water,
        Decimal::new(1250, 2),
        datetime!(2024-06-01 08:00 UTC),
        Some("0x51e7"),
    );
    donations.add_donation(
        7,
        water,
        Decimal::new(5, 0),
        datetime!(2024-06-02 08:00 UTC),
        None,
    );
    AppState::in_memory_with(donations)
}

#[tokio::test]
async fn http_feed_reads_donations_endpoint() {
    let base = spawn_server(seeded_state()).await;
    let feed = HttpDonationFeed::new(base);

    let items = feed.donations_for(7).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].amount, Decimal::from(5));
    assert_eq!(items[0].status(), DonationStatus::Pending);
    assert_eq!(items[1].campaign.title, "Clean Water");
    assert_eq!(items[1].status(), DonationStatus::Completed);
}

#[tokio::test]
async fn payments_view_against_live_server() {
    let base = spawn_server(seeded_state()).await;
    let mut view = PaymentsView::new(HttpDonationFeed::new(base));

    view.load(Some(7)).await;

    assert_eq!(
        view.render(),
        "Clean Water\t6/2/2024\t5 USDC\tpending\nClean Water\t6/1/2024\t12.5 USDC\tcompleted"
    );
}

#[tokio::test]
async fn unreachable_server_renders_empty_history() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut view = PaymentsView::new(HttpDonationFeed::new(format!("http://{addr}")));
    view.load(Some(7)).await;

    assert!(!view.is_loading());
    assert_eq!(view.render(), "No payments found.");
}
