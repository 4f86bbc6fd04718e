//! Software bill of materials in CycloneDX JSON.
//!
//! The dependency list is extracted from `Cargo.toml` by the build script and
//! embedded at compile time.

use crate::commands::CmdResult;
use crate::error::{QrvcError, Result};
use serde::Serialize;

const DEPENDENCIES: &str = include_str!(concat!(env!("OUT_DIR"), "/dependencies.txt"));

const BOM_FORMAT: &str = "CycloneDX";
const SPEC_VERSION: &str = "1.5";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Bom {
    bom_format: &'static str,
    spec_version: &'static str,
    version: u32,
    metadata: Metadata,
    components: Vec<Component>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    component: Component,
}

#[derive(Debug, Serialize)]
struct Component {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    version: String,
    purl: String,
}

impl Component {
    fn new(kind: &'static str, name: &str, version: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            version: version.to_string(),
            purl: format!("pkg:cargo/{}@{}", name, version),
        }
    }
}

pub fn run() -> Result<CmdResult> {
    let bom = build(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), DEPENDENCIES)?;
    Ok(CmdResult::default().with_bom(bom))
}

/// Builds the document from `name version` lines.
pub fn build(name: &str, version: &str, dependencies: &str) -> Result<String> {
    let components = dependencies
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.split_whitespace();
            let dep_name = parts.next().unwrap_or_default();
            let dep_version = parts.next().unwrap_or("*");
            Component::new("library", dep_name, dep_version)
        })
        .collect();

    let bom = Bom {
        bom_format: BOM_FORMAT,
        spec_version: SPEC_VERSION,
        version: 1,
        metadata: Metadata {
            component: Component::new("application", name, version),
        },
        components,
    };

    serde_json::to_string_pretty(&bom).map_err(|e| QrvcError::Bom(e.to_string()))
}
