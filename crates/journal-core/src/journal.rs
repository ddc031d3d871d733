// ── Journal drill-down state ──
//
// Owns the API client plus the current selection path:
// expansions → instances of one expansion → one instance → one encounter.
// Each level is fetched fresh when selected and replaces whatever was
// there; changing an upper level clears everything below it.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use journal_api::models::{EncounterDetail, Expansion, Instance};
use journal_api::{JournalClient, Locale, Region};

use crate::config::JournalConfig;
use crate::error::CoreError;

/// UI-agnostic journal session.
pub struct Journal {
    client: JournalClient,
    locale: Locale,
    expansions: Vec<Expansion>,
    expansion_id: Option<u64>,
    instances: Vec<Instance>,
    instance_id: Option<u64>,
    encounter: Option<EncounterDetail>,
}

impl Journal {
    /// Build the client from `config`. Credentials, if present, are
    /// installed but not checked; nothing is fetched yet.
    pub async fn new(config: JournalConfig) -> Result<Self, CoreError> {
        let http = config.transport().build_client()?;
        let client = JournalClient::with_client(http, config.region, config.hosts)?;
        if let Some(creds) = config.credentials {
            client.configure(creds.client_id, creds.client_secret).await;
        }
        Ok(Self::from_client(client, config.locale))
    }

    /// Wrap an existing client.
    pub fn from_client(client: JournalClient, locale: Locale) -> Self {
        Self {
            client,
            locale,
            expansions: Vec::new(),
            expansion_id: None,
            instances: Vec::new(),
            instance_id: None,
            encounter: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn client(&self) -> &JournalClient {
        &self.client
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn region(&self) -> Region {
        self.client.region()
    }

    /// Credentials are set and non-empty. No server round trip.
    pub async fn is_authenticated(&self) -> bool {
        self.client.is_authenticated().await
    }

    pub fn loaded_expansions(&self) -> &[Expansion] {
        &self.expansions
    }

    pub fn selected_expansion(&self) -> Option<&Expansion> {
        let id = self.expansion_id?;
        self.expansions.iter().find(|e| e.id == id)
    }

    pub fn selected_expansion_id(&self) -> Option<u64> {
        self.expansion_id
    }

    pub fn loaded_instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn selected_instance(&self) -> Option<&Instance> {
        let id = self.instance_id?;
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn selected_encounter(&self) -> Option<&EncounterDetail> {
        self.encounter.as_ref()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Install credentials and load the expansion list with them.
    ///
    /// Values that are blank after trimming are rejected; accepted values
    /// are sent as given. If the first load fails the credentials are
    /// dropped again so the session stays signed out.
    pub async fn sign_in(
        &mut self,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<&[Expansion], CoreError> {
        if client_id.trim().is_empty() || client_secret.expose_secret().trim().is_empty() {
            return Err(CoreError::Configuration {
                message: "client id and client secret are both required".into(),
            });
        }

        self.client.configure(client_id, client_secret.clone()).await;

        if let Err(e) = self.load_expansions().await {
            warn!(error = %e, "sign-in failed, clearing credentials");
            self.sign_out().await;
            return Err(e);
        }

        info!(region = %self.region(), "signed in");
        Ok(&self.expansions)
    }

    /// Forget credentials, token and the whole selection path.
    pub async fn sign_out(&mut self) {
        self.client.sign_out().await;
        self.expansions.clear();
        self.clear_below_expansions();
        debug!("signed out");
    }

    /// Obtain a token now and report when it expires.
    pub async fn verify(&self) -> Result<DateTime<Utc>, CoreError> {
        Ok(self.client.verify().await?)
    }

    // ── Drill-down ───────────────────────────────────────────────────

    /// Replace the expansion list. The current selection is left alone.
    pub async fn load_expansions(&mut self) -> Result<&[Expansion], CoreError> {
        self.expansions = self.expansions().await?;
        Ok(&self.expansions)
    }

    /// Switch locale and re-fetch every loaded level in it.
    ///
    /// A signed-out session only records the new locale.
    pub async fn set_locale(&mut self, locale: Locale) -> Result<(), CoreError> {
        if locale == self.locale {
            return Ok(());
        }
        self.locale = locale;
        debug!(%locale, "locale changed");

        if !self.is_authenticated().await {
            return Ok(());
        }

        self.load_expansions().await?;
        if let Some(expansion_id) = self.expansion_id {
            self.instances = self.instances_for(expansion_id).await?;
            if self.selected_instance().is_none() {
                self.instance_id = None;
                self.encounter = None;
            }
        }
        if let Some(encounter_id) = self.encounter.as_ref().map(|e| e.id) {
            self.encounter = Some(self.encounter(encounter_id).await?);
        }
        Ok(())
    }

    /// Load the instances of `expansion_id`; instance and encounter
    /// selections are cleared first.
    pub async fn select_expansion(&mut self, expansion_id: u64) -> Result<&[Instance], CoreError> {
        self.clear_below_expansions();
        self.expansion_id = Some(expansion_id);
        self.instances = self.instances_for(expansion_id).await?;
        Ok(&self.instances)
    }

    /// Pick one of the loaded instances; the encounter selection is cleared.
    pub fn select_instance(&mut self, instance_id: u64) -> Result<&Instance, CoreError> {
        let index = self
            .instances
            .iter()
            .position(|i| i.id == instance_id)
            .ok_or_else(|| CoreError::not_found("instance", instance_id))?;
        self.instance_id = Some(instance_id);
        self.encounter = None;
        Ok(&self.instances[index])
    }

    /// Fetch and hold the detail of one encounter.
    pub async fn select_encounter(
        &mut self,
        encounter_id: u64,
    ) -> Result<&EncounterDetail, CoreError> {
        let detail = self.encounter(encounter_id).await?;
        let detail: &EncounterDetail = self.encounter.insert(detail);
        Ok(detail)
    }

    fn clear_below_expansions(&mut self) {
        self.expansion_id = None;
        self.instances.clear();
        self.instance_id = None;
        self.encounter = None;
    }

    // ── One-shot fetches (no state change) ───────────────────────────

    pub async fn expansions(&self) -> Result<Vec<Expansion>, CoreError> {
        Ok(self.client.list_expansions(self.locale).await?)
    }

    pub async fn instances_for(&self, expansion_id: u64) -> Result<Vec<Instance>, CoreError> {
        Ok(self
            .client
            .list_instances_for_expansion(expansion_id, self.locale)
            .await?)
    }

    pub async fn instance(&self, instance_id: u64) -> Result<Instance, CoreError> {
        self.client
            .get_instance_detail(instance_id, self.locale)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("instance", instance_id))
    }

    pub async fn encounter(&self, encounter_id: u64) -> Result<EncounterDetail, CoreError> {
        self.client
            .get_encounter_detail(encounter_id, self.locale)
            .await
            .map_err(|e| CoreError::from(e).or_not_found("encounter", encounter_id))
    }
}
