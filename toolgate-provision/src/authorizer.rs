//! Cognito user pool configured for the OAuth client-credentials grant.

use crate::GatewayProvisioner;
use crate::error::ProvisionError;
use aws_sdk_cognitoidentityprovider::types::{OAuthFlowType, ResourceServerScopeType};
use serde_json::Map;
use toolgate_core::{ClientInfo, Region};
use tracing::info;
use uuid::Uuid;

const SERVICE: &str = "cognito-idp";
const INVOKE_SCOPE: &str = "invoke";

/// What the gateway and the agent each need to know about the authorizer.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthAuthorizer {
    pub client_info: ClientInfo,
    pub discovery_url: String,
    pub allowed_client: String,
}

pub fn discovery_url(region: Region, user_pool_id: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}/.well-known/openid-configuration")
}

pub fn token_endpoint(region: Region, domain_prefix: &str) -> String {
    format!("https://{domain_prefix}.auth.{region}.amazoncognito.com/oauth2/token")
}

/// Hosted-UI domains are global, so the prefix carries a random component.
pub fn random_domain_prefix() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("agentcore-{}", &id[..8])
}

impl GatewayProvisioner {
    pub async fn create_oauth_authorizer(&self, name: &str) -> Result<OAuthAuthorizer, ProvisionError> {
        let pool = self
            .cognito
            .create_user_pool()
            .pool_name(name)
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateUserPool", err))?;
        let user_pool_id = pool
            .user_pool()
            .and_then(|pool| pool.id())
            .ok_or_else(|| ProvisionError::missing("CreateUserPool", "user pool id"))?
            .to_string();
        info!(user_pool_id = %user_pool_id, "user pool created");

        let domain_prefix = random_domain_prefix();
        self.cognito
            .create_user_pool_domain()
            .domain(&domain_prefix)
            .user_pool_id(&user_pool_id)
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateUserPoolDomain", err))?;

        let resource_server_id = name.to_string();
        let invoke = ResourceServerScopeType::builder()
            .scope_name(INVOKE_SCOPE)
            .scope_description("Invoke gateway tools")
            .build()?;
        self.cognito
            .create_resource_server()
            .user_pool_id(&user_pool_id)
            .identifier(&resource_server_id)
            .name(&resource_server_id)
            .scopes(invoke)
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateResourceServer", err))?;

        let scope = format!("{resource_server_id}/{INVOKE_SCOPE}");
        let app = self
            .cognito
            .create_user_pool_client()
            .user_pool_id(&user_pool_id)
            .client_name(format!("{name}-client"))
            .generate_secret(true)
            .allowed_o_auth_flows(OAuthFlowType::ClientCredentials)
            .allowed_o_auth_scopes(&scope)
            .allowed_o_auth_flows_user_pool_client(true)
            .supported_identity_providers("COGNITO")
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateUserPoolClient", err))?;
        let app = app
            .user_pool_client()
            .ok_or_else(|| ProvisionError::missing("CreateUserPoolClient", "user pool client"))?;
        let client_id = app
            .client_id()
            .ok_or_else(|| ProvisionError::missing("CreateUserPoolClient", "client id"))?
            .to_string();
        let client_secret = app
            .client_secret()
            .ok_or_else(|| ProvisionError::missing("CreateUserPoolClient", "client secret"))?
            .to_string();
        info!(client_id = %client_id, "app client created");

        Ok(OAuthAuthorizer {
            discovery_url: discovery_url(self.region, &user_pool_id),
            allowed_client: client_id.clone(),
            client_info: ClientInfo {
                client_id,
                client_secret,
                token_endpoint: token_endpoint(self.region, &domain_prefix),
                scope,
                user_pool_id: Some(user_pool_id),
                domain_prefix: Some(domain_prefix),
                extra: Map::new(),
            },
        })
    }
}
