pub mod feed;
pub mod view;

pub use feed::{DonationFeed, HttpDonationFeed};
pub use view::{PaymentRow, PaymentsState, PaymentsView};
