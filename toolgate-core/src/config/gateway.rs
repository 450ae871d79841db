use super::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Regions the gateway stack is known to be deployable in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Europe (Ireland)
    #[serde(rename = "eu-west-1")]
    EuWest1,
    /// Europe (Paris)
    #[serde(rename = "eu-west-3")]
    EuWest3,
    /// Europe (Frankfurt)
    #[serde(rename = "eu-central-1")]
    EuCentral1,
    /// Europe (Stockholm)
    #[serde(rename = "eu-north-1")]
    EuNorth1,
    #[serde(rename = "us-east-1")]
    UsEast1,
    #[serde(rename = "us-west-2")]
    UsWest2,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::EuWest1,
        Region::EuWest3,
        Region::EuCentral1,
        Region::EuNorth1,
        Region::UsEast1,
        Region::UsWest2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::EuWest1 => "eu-west-1",
            Region::EuWest3 => "eu-west-3",
            Region::EuCentral1 => "eu-central-1",
            Region::EuNorth1 => "eu-north-1",
            Region::UsEast1 => "us-east-1",
            Region::UsWest2 => "us-west-2",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == value)
            .ok_or_else(|| ConfigError::UnknownRegion(value.to_string()))
    }
}

/// Credentials reference for the OAuth client the agent authenticates with.
///
/// Fields not modelled here are carried through untouched so that configs
/// written by other tools survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub client_id: String,
    pub client_secret: String,
    pub token_endpoint: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_pool_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_prefix: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNames {
    pub authorizer: String,
    pub gateway: String,
    pub target: String,
}

impl ResourceNames {
    /// Names derived from a run suffix so that runs never clobber each other.
    pub fn for_suffix(suffix: &str) -> Self {
        Self {
            authorizer: format!("TestGateway-{suffix}"),
            gateway: format!("AgentCoreGateway-{suffix}"),
            target: format!("AgentCoreLambdaTarget-{suffix}"),
        }
    }
}

/// Everything the runner needs to reach a provisioned gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub gateway_url: String,
    pub gateway_id: String,
    pub region: Region,
    pub client_info: ClientInfo,
    pub names: ResourceNames,
    pub suffix: String,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.gateway_url).map_err(|err| ConfigError::InvalidGatewayUrl {
            url: self.gateway_url.clone(),
            reason: err.to_string(),
        })?;
        if !is_valid_suffix(&self.suffix) {
            return Err(ConfigError::InvalidSuffix {
                suffix: self.suffix.clone(),
            });
        }
        Ok(())
    }
}

pub fn is_valid_suffix(suffix: &str) -> bool {
    suffix.len() == 4 && suffix.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_round_trips_through_its_identifier() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().ok(), Some(region));
        }
        assert!(matches!(
            "mars-north-1".parse::<Region>(),
            Err(ConfigError::UnknownRegion(_))
        ));
    }

    #[test]
    fn resource_names_embed_the_suffix() {
        let names = ResourceNames::for_suffix("0042");
        assert_eq!(names.authorizer, "TestGateway-0042");
        assert_eq!(names.gateway, "AgentCoreGateway-0042");
        assert_eq!(names.target, "AgentCoreLambdaTarget-0042");
    }

    #[test]
    fn suffix_must_be_four_digits() {
        assert!(is_valid_suffix("0007"));
        assert!(!is_valid_suffix("007"));
        assert!(!is_valid_suffix("12a4"));
        assert!(!is_valid_suffix("12345"));
    }

    #[test]
    fn client_info_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "client_id": "abc",
            "client_secret": "shh",
            "token_endpoint": "https://auth.example.com/oauth2/token",
            "scope": "gateway/invoke",
            "user_pool_id": "eu-west-1_pool",
            "issuer": "https://issuer.example.com"
        });
        let info: ClientInfo = serde_json::from_value(raw.clone()).expect("client info");
        assert_eq!(info.domain_prefix, None);
        assert_eq!(info.extra.get("issuer"), raw.get("issuer"));
        assert_eq!(serde_json::to_value(&info).expect("encode"), raw);
    }
}
