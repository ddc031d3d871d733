// Journal data API client modules
//
// Read-only access to the game-journal documents: the expansion index,
// the instance index and per-instance details, and encounter details.
// Every request is scoped by the client's region namespace and a locale.

pub mod client;
pub mod encounters;
pub mod expansions;
pub mod instances;
pub mod models;

pub use client::JournalClient;
