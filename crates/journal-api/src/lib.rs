// journal-api: Async Rust client for the Battle.net game-journal API
//
// OAuth client-credentials token management plus the read-only journal
// endpoints (expansions, instances, encounters), region- and locale-aware.

pub mod auth;
pub mod error;
pub mod fanout;
pub mod journal;
pub mod locale;
pub mod region;
pub mod token;
pub mod transport;

pub use auth::{Clock, Credentials, SystemClock};
pub use error::Error;
pub use fanout::fan_out;
pub use journal::JournalClient;
pub use journal::models;
pub use locale::{Locale, LocalizedText};
pub use region::{ApiHosts, Region};
pub use token::{AccessToken, EXPIRY_MARGIN_SECS, TokenManager};
pub use transport::{TlsMode, TransportConfig};
