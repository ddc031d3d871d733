// Regions and host resolution
//
// A region picks three things at once: the OAuth host, the data API host,
// and the `static-{region}` namespace sent with every data request.
// `ApiHosts::Custom` replaces both hosts (mock servers, proxies) while the
// namespace still follows the region.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use url::Url;

use crate::error::Error;

/// Battle.net API region.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Region {
    Us,
    Eu,
    #[default]
    Kr,
    Tw,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Static-data namespace for this region, e.g. `static-kr`.
    pub fn namespace(self) -> String {
        format!("static-{}", self.as_str())
    }

    /// `https://{region}.battle.net/oauth/token`
    pub fn token_url(self) -> String {
        format!("https://{}.battle.net/oauth/token", self.as_str())
    }

    /// `https://{region}.api.blizzard.com`
    pub fn api_base(self) -> String {
        format!("https://{}.api.blizzard.com", self.as_str())
    }
}

/// Where the token exchange and data requests are sent.
#[derive(Debug, Clone, Default)]
pub enum ApiHosts {
    /// Derive both hosts from the configured region.
    #[default]
    Regional,
    /// Fixed hosts, independent of region.
    Custom { token_url: Url, api_base: Url },
}

impl ApiHosts {
    /// Token endpoint for the given region.
    pub fn token_url(&self, region: Region) -> Result<Url, Error> {
        match self {
            Self::Regional => Ok(Url::parse(&region.token_url())?),
            Self::Custom { token_url, .. } => Ok(token_url.clone()),
        }
    }

    /// Full URL for a data endpoint path such as `/data/wow/journal-instance/index`.
    ///
    /// The path is appended verbatim so a custom base with its own path
    /// prefix keeps that prefix.
    pub fn endpoint_url(&self, region: Region, endpoint: &str) -> Result<Url, Error> {
        let base = match self {
            Self::Regional => region.api_base(),
            Self::Custom { api_base, .. } => api_base.as_str().to_owned(),
        };
        let full = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn default_region_is_kr() {
        assert_eq!(Region::default(), Region::Kr);
        assert_eq!(Region::default().namespace(), "static-kr");
    }

    #[test]
    fn region_parses_case_insensitively() {
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert!("mars".parse::<Region>().is_err());
    }

    #[test]
    fn regional_hosts_follow_region() {
        let hosts = ApiHosts::Regional;
        assert_eq!(
            hosts.token_url(Region::Eu).unwrap().as_str(),
            "https://eu.battle.net/oauth/token"
        );
        assert_eq!(
            hosts
                .endpoint_url(Region::Tw, "/data/wow/journal-expansion/index")
                .unwrap()
                .as_str(),
            "https://tw.api.blizzard.com/data/wow/journal-expansion/index"
        );
    }

    #[test]
    fn custom_base_keeps_path_prefix() {
        let hosts = ApiHosts::Custom {
            token_url: Url::parse("http://127.0.0.1:9000/oauth/token").unwrap(),
            api_base: Url::parse("http://127.0.0.1:9000/proxy/").unwrap(),
        };
        assert_eq!(
            hosts
                .endpoint_url(Region::Kr, "/data/wow/journal-encounter/89")
                .unwrap()
                .as_str(),
            "http://127.0.0.1:9000/proxy/data/wow/journal-encounter/89"
        );
        assert_eq!(
            hosts.token_url(Region::Us).unwrap().as_str(),
            "http://127.0.0.1:9000/oauth/token"
        );
    }
}
