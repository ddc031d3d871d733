// Journal instance endpoints
//
// The instance index carries no expansion linkage, so listing the
// instances of one expansion means fetching every instance's detail
// document and filtering on `expansion.id`. Detail fetches run
// concurrently; a failed one drops that instance only, unless the token
// itself could not be obtained.

use tracing::debug;

use crate::error::Error;
use crate::fanout::fan_out;
use crate::journal::client::JournalClient;
use crate::journal::models::{Instance, InstanceIndex, Reference};
use crate::locale::Locale;

impl JournalClient {
    /// `GET /data/wow/journal-instance/index`
    pub async fn list_instance_index(&self, locale: Locale) -> Result<Vec<Reference>, Error> {
        let index: InstanceIndex = self
            .get("/data/wow/journal-instance/index", locale)
            .await?;
        Ok(index.instances.unwrap_or_default())
    }

    /// `GET /data/wow/journal-instance/{id}`
    pub async fn get_instance_detail(&self, id: u64, locale: Locale) -> Result<Instance, Error> {
        self.get(&format!("/data/wow/journal-instance/{id}"), locale)
            .await
    }

    /// Detailed instances belonging to `expansion_id`, in index order.
    ///
    /// Fails if the index request fails or if a token cannot be obtained
    /// at any point. Other detail failures are logged and omitted.
    pub async fn list_instances_for_expansion(
        &self,
        expansion_id: u64,
        locale: Locale,
    ) -> Result<Vec<Instance>, Error> {
        let ids: Vec<u64> = self
            .list_instance_index(locale)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        let total = ids.len();

        let details = fan_out("instance", ids, |id| {
            let id = *id;
            async move { self.get_instance_detail(id, locale).await }
        })
        .await?;
        let fetched = details.len();

        let matching: Vec<Instance> = details
            .into_iter()
            .filter(|instance| instance.expansion.id == expansion_id)
            .collect();

        debug!(
            expansion_id,
            total,
            fetched,
            matching = matching.len(),
            "resolved instances for expansion"
        );
        Ok(matching)
    }
}
