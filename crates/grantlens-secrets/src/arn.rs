//! KMS alias ARN parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::SecretError;

const ALIAS_PREFIX: &str = "alias/";

/// An alias ARN of the form `arn:<partition>:kms:<region>:<account>:alias/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmsAliasArn {
    pub partition: String,
    pub region: String,
    pub account: String,
    /// Alias name without the `alias/` prefix.
    pub alias: String,
}

impl FromStr for KmsAliasArn {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(6, ':').collect();
        let [scheme, partition, service, region, account, resource] = parts.as_slice() else {
            return Err(SecretError::invalid_key_id(s, "not an ARN"));
        };

        if *scheme != "arn" {
            return Err(SecretError::invalid_key_id(s, "not an ARN"));
        }
        if *service != "kms" {
            return Err(SecretError::invalid_key_id(
                s,
                format!("expected service 'kms', got '{service}'"),
            ));
        }
        if region.is_empty() {
            return Err(SecretError::invalid_key_id(s, "missing region"));
        }
        let alias = match resource.strip_prefix(ALIAS_PREFIX) {
            Some(alias) if !alias.is_empty() => alias,
            _ => return Err(SecretError::invalid_key_id(s, "resource is not an alias")),
        };

        Ok(Self {
            partition: partition.to_string(),
            region: region.to_string(),
            account: account.to_string(),
            alias: alias.to_string(),
        })
    }
}

impl fmt::Display for KmsAliasArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:kms:{}:{}:{ALIAS_PREFIX}{}",
            self.partition, self.region, self.account, self.alias
        )
    }
}
