//! Resolver configuration value object
//!
//! The project layout rules the change resolver applies. Defaults follow the
//! Salesforce DX source layout that `sfdx force:source:deploy` expects.

use serde::{Deserialize, Serialize};

/// Files under a directory segment named `segment` deploy as one bundle.
///
/// The bundle root is the path up to and including `segment`, extended by
/// `depth` further segments (0 = the segment directory itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRule {
    pub segment: String,
    #[serde(default)]
    pub depth: usize,
}

/// A descriptor file whose whole ancestor directory deploys together.
///
/// The unit root is `levels_up` directories above the descriptor
/// (1 = the directory containing it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorRule {
    pub suffix: String,
    pub levels_up: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Only files below this top-level directory are deployed
    pub source_root: String,
    /// Suffix of metadata companion files (`Foo.cls` + `Foo.cls-meta.xml`)
    pub metadata_suffix: String,
    pub bundles: Vec<BundleRule>,
    pub descriptors: Vec<DescriptorRule>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            source_root: "src".to_string(),
            metadata_suffix: "-meta.xml".to_string(),
            bundles: vec![BundleRule {
                segment: "staticresources".to_string(),
                depth: 0,
            }],
            descriptors: vec![
                DescriptorRule {
                    suffix: "object-meta.xml".to_string(),
                    levels_up: 1,
                },
                DescriptorRule {
                    suffix: "field-meta.xml".to_string(),
                    levels_up: 2,
                },
            ],
        }
    }
}
