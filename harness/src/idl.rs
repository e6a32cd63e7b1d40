//! Anchor interface descriptions (IDL JSON).
//!
//! Only the parts needed to build instructions are modelled: program
//! address, instruction discriminators, and account resolution hints.
//! Argument types are carried opaquely.
//!
//! Both layouts are accepted: 0.30+ (`address`, `metadata.name`,
//! `writable`/`signer`) and the legacy one (top-level `name`,
//! `metadata.address`, `isMut`/`isSigner`, string const seeds).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};

use crate::error::InterfaceError;

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceDescription {
    /// Present in IDLs from Anchor 0.30 onward
    #[serde(default)]
    pub address: Option<String>,
    /// Legacy IDLs name the program at the top level
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metadata: IdlMetadata,
    pub instructions: Vec<IdlInstruction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdlMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Legacy IDLs carry the deployed address here
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub discriminator: Vec<u8>,
    #[serde(default)]
    pub accounts: Vec<IdlAccount>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlAccount {
    pub name: String,
    #[serde(default, alias = "isMut")]
    pub writable: bool,
    #[serde(default, alias = "isSigner")]
    pub signer: bool,
    #[serde(default, alias = "isOptional")]
    pub optional: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pda: Option<IdlPda>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlPda {
    pub seeds: Vec<IdlSeed>,
    /// Derive under another program instead of the owning one
    #[serde(default, alias = "programId")]
    pub program: Option<IdlSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdlSeed {
    Const {
        #[serde(deserialize_with = "const_seed_bytes")]
        value: Vec<u8>,
    },
    Account { path: String },
    Arg { path: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

impl InterfaceDescription {
    pub fn from_json(json: &str) -> Result<Self, InterfaceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InterfaceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| InterfaceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load `target/idl/<name>.json` from the Anchor workspace root.
    pub fn workspace(name: &str) -> Result<Self, InterfaceError> {
        Self::from_file(workspace_root().join("target/idl").join(format!("{name}.json")))
    }

    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.metadata.name.as_deref())
            .unwrap_or_default()
    }

    pub fn program_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or(self.metadata.address.as_deref())
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions.iter().find(|ix| ix.name == name)
    }
}

impl IdlInstruction {
    /// The IDL's discriminator, or Anchor's `sha256("global:<name>")[..8]`
    /// when the IDL predates explicit discriminators.
    pub fn discriminator(&self) -> Vec<u8> {
        if self.discriminator.is_empty() {
            sighash("global", &self.name).to_vec()
        } else {
            self.discriminator.clone()
        }
    }
}

/// Const seeds are byte arrays in 0.30+ and usually strings in legacy IDLs.
fn const_seed_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ConstSeed {
        Bytes(Vec<u8>),
        Text(String),
    }

    Ok(match ConstSeed::deserialize(deserializer)? {
        ConstSeed::Bytes(bytes) => bytes,
        ConstSeed::Text(text) => text.into_bytes(),
    })
}

pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// Walk up from the harness crate (or `ANCHOR_WORKSPACE` if set) to the
/// directory holding `Anchor.toml`.
fn workspace_root() -> PathBuf {
    if let Some(root) = std::env::var_os("ANCHOR_WORKSPACE") {
        return PathBuf::from(root);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .find(|dir| dir.join("Anchor.toml").exists())
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}
