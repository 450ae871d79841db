//! The function behind the gateway target.

use crate::GatewayProvisioner;
use crate::error::ProvisionError;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{Architecture, FunctionCode, Runtime};
use std::path::{Path, PathBuf};
use tracing::info;

const SERVICE: &str = "lambda";

pub const DEFAULT_LAMBDA_ZIP: &str = "target/lambda/toolgate-lambda/bootstrap.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LambdaSource {
    /// A function deployed beforehand.
    Existing { arn: String },
    /// A zipped `bootstrap` binary to deploy as a new function.
    Package { zip_path: PathBuf },
}

impl LambdaSource {
    pub fn from_args(lambda_arn: Option<String>, zip_path: Option<PathBuf>) -> Self {
        match lambda_arn {
            Some(arn) => LambdaSource::Existing { arn },
            None => LambdaSource::Package {
                zip_path: zip_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LAMBDA_ZIP)),
            },
        }
    }

    pub fn needs_role(&self) -> bool {
        matches!(self, LambdaSource::Package { .. })
    }
}

impl GatewayProvisioner {
    /// Resolve the target function ARN, deploying the package when needed.
    /// `role_arn` is only consulted for [`LambdaSource::Package`].
    pub async fn ensure_target_function(
        &self,
        source: &LambdaSource,
        function_name: &str,
        role_arn: Option<&str>,
    ) -> Result<String, ProvisionError> {
        match source {
            LambdaSource::Existing { arn } => {
                info!(function = %arn, "using existing function");
                Ok(arn.clone())
            }
            LambdaSource::Package { zip_path } => {
                let role_arn =
                    role_arn.ok_or_else(|| ProvisionError::missing("CreateFunction", "role arn"))?;
                self.deploy_package(zip_path, function_name, role_arn).await
            }
        }
    }

    async fn deploy_package(
        &self,
        zip_path: &Path,
        function_name: &str,
        role_arn: &str,
    ) -> Result<String, ProvisionError> {
        let bytes = tokio::fs::read(zip_path)
            .await
            .map_err(|source| ProvisionError::Package {
                path: zip_path.to_path_buf(),
                source,
            })?;
        info!(function = function_name, bytes = bytes.len(), "deploying function package");

        let output = self
            .lambda
            .create_function()
            .function_name(function_name)
            .runtime(Runtime::Providedal2023)
            .handler("bootstrap")
            .architectures(Architecture::X8664)
            .role(role_arn)
            .timeout(30)
            .code(FunctionCode::builder().zip_file(Blob::new(bytes)).build())
            .send()
            .await
            .map_err(|err| ProvisionError::service(SERVICE, "CreateFunction", err))?;
        output
            .function_arn()
            .map(str::to_string)
            .ok_or_else(|| ProvisionError::missing("CreateFunction", "function arn"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arn_takes_precedence_over_package() {
        let source = LambdaSource::from_args(
            Some("arn:aws:lambda:eu-west-1:123456789012:function:tools".into()),
            Some(PathBuf::from("custom.zip")),
        );
        assert!(matches!(source, LambdaSource::Existing { .. }));
        assert!(!source.needs_role());
    }

    #[test]
    fn package_defaults_to_build_output() {
        let source = LambdaSource::from_args(None, None);
        assert_eq!(
            source,
            LambdaSource::Package {
                zip_path: PathBuf::from(DEFAULT_LAMBDA_ZIP)
            }
        );
        assert!(source.needs_role());
    }
}
