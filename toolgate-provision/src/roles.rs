//! IAM roles for the gateway and the target function.

use crate::GatewayProvisioner;
use crate::error::ProvisionError;
use serde_json::{Value, json};
use tracing::info;

const SERVICE: &str = "iam";
const GATEWAY_PRINCIPAL: &str = "bedrock-agentcore.amazonaws.com";
const LAMBDA_PRINCIPAL: &str = "lambda.amazonaws.com";
const LAMBDA_BASIC_EXECUTION: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

pub fn trust_policy(service_principal: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": { "Service": service_principal },
            "Action": "sts:AssumeRole"
        }]
    })
}

pub fn invoke_function_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Action": "lambda:InvokeFunction",
            "Resource": "*"
        }]
    })
}

impl GatewayProvisioner {
    /// Role assumed by the gateway; allowed to invoke function targets.
    pub async fn create_gateway_role(&self, gateway_name: &str) -> Result<String, ProvisionError> {
        let role_name = format!("{gateway_name}-role");
        let arn = self.create_role(&role_name, GATEWAY_PRINCIPAL).await?;
        self.iam
            .put_role_policy()
            .role_name(&role_name)
            .policy_name("InvokeFunctionTargets")
            .policy_document(invoke_function_policy().to_string())
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "PutRolePolicy", err))?;
        info!(role = %role_name, "gateway role ready");
        Ok(arn)
    }

    /// Execution role for the target function, with log delivery only.
    pub async fn create_function_role(&self, function_name: &str) -> Result<String, ProvisionError> {
        let role_name = format!("{function_name}-role");
        let arn = self.create_role(&role_name, LAMBDA_PRINCIPAL).await?;
        self.iam
            .attach_role_policy()
            .role_name(&role_name)
            .policy_arn(LAMBDA_BASIC_EXECUTION)
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "AttachRolePolicy", err))?;
        info!(role = %role_name, "function role ready");
        Ok(arn)
    }

    async fn create_role(&self, role_name: &str, principal: &str) -> Result<String, ProvisionError> {
        let output = self
            .iam
            .create_role()
            .role_name(role_name)
            .assume_role_policy_document(trust_policy(principal).to_string())
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateRole", err))?;
        output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| ProvisionError::missing("CreateRole", "role"))
    }
}
