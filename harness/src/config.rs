use std::{path::PathBuf, str::FromStr, time::Duration};

use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

use crate::error::ConfigError;

pub const PROVIDER_URL_ENV: &str = "ANCHOR_PROVIDER_URL";
pub const WALLET_ENV: &str = "ANCHOR_WALLET";
pub const COMMITMENT_ENV: &str = "TZT_COMMITMENT";
pub const CONFIRM_TIMEOUT_ENV: &str = "TZT_CONFIRM_TIMEOUT_MS";
pub const POLL_INTERVAL_ENV: &str = "TZT_POLL_INTERVAL_MS";
pub const SKIP_PREFLIGHT_ENV: &str = "TZT_SKIP_PREFLIGHT";

const DEFAULT_WALLET: &str = "~/.config/solana/id.json";

/// Cluster the provider talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
    Custom(String),
}

impl Cluster {
    pub fn url(&self) -> &str {
        match self {
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Custom(url) => url,
        }
    }
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        match lower.as_str() {
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            "devnet" | "d" => Ok(Cluster::Devnet),
            "testnet" | "t" => Ok(Cluster::Testnet),
            "mainnet" | "mainnet-beta" | "m" => Ok(Cluster::Mainnet),
            _ if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Cluster::Custom(trimmed.to_string()))
            }
            _ => Err(ConfigError::Invalid {
                key: PROVIDER_URL_ENV,
                value: s.to_string(),
            }),
        }
    }
}

/// Provider and confirmation settings for one test run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub cluster: Cluster,
    pub wallet: PathBuf,
    pub commitment: CommitmentConfig,
    /// Default deadline for [`crate::invoke`]
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
    pub skip_preflight: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::Localnet,
            wallet: expand_home(DEFAULT_WALLET),
            commitment: CommitmentConfig::confirmed(),
            confirm_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(400),
            skip_preflight: false,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(PROVIDER_URL_ENV) {
            config.cluster = url.parse()?;
        }
        if let Some(wallet) = lookup(WALLET_ENV) {
            config.wallet = expand_home(&wallet);
        }
        if let Some(level) = lookup(COMMITMENT_ENV) {
            let level = CommitmentLevel::from_str(level.trim()).map_err(|_| ConfigError::Invalid {
                key: COMMITMENT_ENV,
                value: level.clone(),
            })?;
            config.commitment = CommitmentConfig { commitment: level };
        }
        if let Some(ms) = lookup(CONFIRM_TIMEOUT_ENV) {
            config.confirm_timeout = parse_millis(CONFIRM_TIMEOUT_ENV, &ms)?;
        }
        if let Some(ms) = lookup(POLL_INTERVAL_ENV) {
            config.poll_interval = parse_millis(POLL_INTERVAL_ENV, &ms)?;
        }
        if let Some(flag) = lookup(SKIP_PREFLIGHT_ENV) {
            config.skip_preflight = match flag.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: SKIP_PREFLIGHT_ENV,
                        value: flag,
                    })
                }
            };
        }

        Ok(config)
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
