// Journal encounter endpoints

use crate::error::Error;
use crate::journal::client::JournalClient;
use crate::journal::models::EncounterDetail;
use crate::locale::Locale;

impl JournalClient {
    /// Full encounter document, including the nested section tree.
    ///
    /// `GET /data/wow/journal-encounter/{id}`
    pub async fn get_encounter_detail(
        &self,
        id: u64,
        locale: Locale,
    ) -> Result<EncounterDetail, Error> {
        self.get(&format!("/data/wow/journal-encounter/{id}"), locale)
            .await
    }
}
