// Journal expansion endpoints

use tracing::debug;

use crate::error::Error;
use crate::journal::client::JournalClient;
use crate::journal::models::{Expansion, ExpansionIndex};
use crate::locale::Locale;

impl JournalClient {
    /// List every expansion tier, in server order.
    ///
    /// `GET /data/wow/journal-expansion/index`. A document without `tiers`
    /// yields an empty list.
    pub async fn list_expansions(&self, locale: Locale) -> Result<Vec<Expansion>, Error> {
        let index: ExpansionIndex = self
            .get("/data/wow/journal-expansion/index", locale)
            .await?;
        let tiers = index.tiers.unwrap_or_default();
        debug!(count = tiers.len(), "listed expansions");
        Ok(tiers)
    }
}
