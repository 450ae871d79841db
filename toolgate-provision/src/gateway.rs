//! MCP gateway and its function target.

use crate::GatewayProvisioner;
use crate::authorizer::OAuthAuthorizer;
use crate::error::ProvisionError;
use crate::readiness::{Readiness, ReadinessPolicy, poll_until_ready};
use aws_sdk_bedrockagentcorecontrol::types::{
    AuthorizerConfiguration, AuthorizerType, CredentialProviderConfiguration,
    CredentialProviderType, CustomJwtAuthorizerConfiguration, GatewayProtocolConfiguration,
    GatewayProtocolType, GatewayStatus, McpGatewayConfiguration, McpLambdaTargetConfiguration,
    McpTargetConfiguration, SchemaDefinition, SchemaType, SearchType, TargetConfiguration,
    ToolDefinition, ToolSchema,
};
use aws_smithy_types::error::operation::BuildError;
use toolgate_lambda::{TOOL_SPECS, ToolSpec};
use tracing::info;

const SERVICE: &str = "bedrock-agentcore-control";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedGateway {
    pub gateway_id: String,
    pub gateway_url: String,
    pub role_arn: String,
}

pub fn readiness_of(status: &GatewayStatus) -> Readiness {
    match status {
        GatewayStatus::Ready => Readiness::Ready,
        GatewayStatus::Failed => Readiness::Failed(status.as_str().to_string()),
        other => Readiness::Pending(other.as_str().to_string()),
    }
}

fn tool_definition(spec: &ToolSpec) -> Result<ToolDefinition, BuildError> {
    let parameter = SchemaDefinition::builder()
        .r#type(SchemaType::String)
        .description(spec.parameter_description)
        .build()?;
    let input = SchemaDefinition::builder()
        .r#type(SchemaType::Object)
        .properties(spec.parameter, parameter)
        .required(spec.parameter)
        .build()?;
    ToolDefinition::builder()
        .name(spec.name)
        .description(spec.description)
        .input_schema(input)
        .build()
}

/// Inline schema advertising the handler's tools.
pub fn tool_definitions() -> Result<Vec<ToolDefinition>, BuildError> {
    TOOL_SPECS.iter().map(tool_definition).collect()
}

impl GatewayProvisioner {
    pub async fn create_mcp_gateway(
        &self,
        name: &str,
        role_arn: &str,
        authorizer: &OAuthAuthorizer,
    ) -> Result<ProvisionedGateway, ProvisionError> {
        let jwt = CustomJwtAuthorizerConfiguration::builder()
            .discovery_url(&authorizer.discovery_url)
            .allowed_clients(&authorizer.allowed_client)
            .build()?;
        let protocol = McpGatewayConfiguration::builder()
            .search_type(SearchType::Semantic)
            .build();

        let output = self
            .control
            .create_gateway()
            .name(name)
            .role_arn(role_arn)
            .protocol_type(GatewayProtocolType::Mcp)
            .protocol_configuration(GatewayProtocolConfiguration::Mcp(protocol))
            .authorizer_type(AuthorizerType::CustomJwt)
            .authorizer_configuration(AuthorizerConfiguration::CustomJwtAuthorizer(jwt))
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateGateway", err))?;

        let gateway_url = output
            .gateway_url()
            .ok_or_else(|| ProvisionError::missing("CreateGateway", "gateway url"))?
            .to_string();
        let gateway = ProvisionedGateway {
            gateway_id: output.gateway_id().to_string(),
            gateway_url,
            role_arn: role_arn.to_string(),
        };
        info!(gateway_id = %gateway.gateway_id, url = %gateway.gateway_url, "gateway created");
        Ok(gateway)
    }

    pub async fn gateway_readiness(&self, gateway_id: &str) -> Result<Readiness, ProvisionError> {
        let output = self
            .control
            .get_gateway()
            .gateway_identifier(gateway_id)
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "GetGateway", err))?;
        Ok(readiness_of(output.status()))
    }

    pub async fn wait_until_ready(
        &self,
        gateway_id: &str,
        policy: ReadinessPolicy,
    ) -> Result<u32, ProvisionError> {
        let resource = format!("gateway {gateway_id}");
        poll_until_ready(policy, &resource, || self.gateway_readiness(gateway_id)).await
    }

    /// Register the function as an MCP target. Returns the target id.
    pub async fn create_lambda_target(
        &self,
        gateway_id: &str,
        name: &str,
        lambda_arn: &str,
    ) -> Result<String, ProvisionError> {
        let lambda = McpLambdaTargetConfiguration::builder()
            .lambda_arn(lambda_arn)
            .tool_schema(ToolSchema::InlinePayload(tool_definitions()?))
            .build()?;
        let credentials = CredentialProviderConfiguration::builder()
            .credential_provider_type(CredentialProviderType::GatewayIamRole)
            .build()?;

        let output = self
            .control
            .create_gateway_target()
            .gateway_identifier(gateway_id)
            .name(name)
            .target_configuration(TargetConfiguration::Mcp(McpTargetConfiguration::Lambda(lambda)))
            .credential_provider_configurations(credentials)
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateGatewayTarget", err))?;
        let target_id = output.target_id().to_string();
        info!(gateway_id, target_id = %target_id, "target registered");
        Ok(target_id)
    }
}
