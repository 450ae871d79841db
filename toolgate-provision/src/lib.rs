//! # toolgate-provision
//!
//! Creates everything a runnable gateway needs: a Cognito client-credentials
//! authorizer, the IAM roles, the target function, the MCP gateway and its
//! function target. All calls go through [`GatewayProvisioner`].

pub mod authorizer;
pub mod error;
pub mod function;
pub mod gateway;
pub mod readiness;
pub mod roles;

pub use authorizer::OAuthAuthorizer;
pub use error::ProvisionError;
pub use function::{DEFAULT_LAMBDA_ZIP, LambdaSource};
pub use gateway::ProvisionedGateway;
pub use readiness::{
    GATEWAY_READY_INITIAL_DELAY, GATEWAY_READY_MAX_ATTEMPTS, GATEWAY_READY_MAX_DELAY,
    IAM_PROPAGATION_DELAY, Readiness, ReadinessPolicy, poll_until_ready,
};

use aws_config::BehaviorVersion;
use toolgate_core::Region;

/// Service clients for one region.
#[derive(Clone)]
pub struct GatewayProvisioner {
    region: Region,
    cognito: aws_sdk_cognitoidentityprovider::Client,
    iam: aws_sdk_iam::Client,
    lambda: aws_sdk_lambda::Client,
    control: aws_sdk_bedrockagentcorecontrol::Client,
}

impl GatewayProvisioner {
    pub async fn from_region(region: Region) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.as_str()))
            .load()
            .await;
        Self {
            region,
            cognito: aws_sdk_cognitoidentityprovider::Client::new(&shared_config),
            iam: aws_sdk_iam::Client::new(&shared_config),
            lambda: aws_sdk_lambda::Client::new(&shared_config),
            control: aws_sdk_bedrockagentcorecontrol::Client::new(&shared_config),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }
}
