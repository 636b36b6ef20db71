mod login;
pub use login::Login;

mod accounts;
pub use accounts::Accounts;

mod account_detail;
pub use account_detail::AccountDetail;

mod transactions;
pub use transactions::Transactions;

mod goals;
pub use goals::Goals;

mod sms;
pub use sms::{SmsLogDetail, SmsLogs};

mod settings;
pub use settings::Settings;
