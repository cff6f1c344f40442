//! Collaborator types for the binary-patching framework and the driver that
//! walks extracted string resources.

use restyle_core::{Generator, RestyleError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{RewriteOutcome, Rewriter};

/// A string lifted out of a binary image, with the offset it came from.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StringResource {
    pub offset: u64,
    pub text: String,
}

/// Replacement instruction handed back to the patching framework, which
/// performs the byte-level patch itself.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StringPatch {
    /// Relative to the resource, which starts at the string itself.
    pub offset: u64,
    pub replacement: String,
    pub null_terminate: bool,
}

impl<G: Generator> Rewriter<G> {
    /// Rewrites one extracted string. Strings shorter than the configured
    /// minimum are left untouched, as are abandoned rewrites.
    pub async fn rewrite_resource(
        &self,
        resource: &StringResource,
    ) -> Result<Option<StringPatch>, RestyleError> {
        if resource.text.chars().count() < self.config.min_length {
            return Ok(None);
        }
        match self.rewrite(&resource.text).await? {
            RewriteOutcome::Rewritten { text, .. } => Ok(Some(StringPatch {
                offset: 0,
                replacement: text,
                null_terminate: true,
            })),
            RewriteOutcome::Abandoned { .. } => Ok(None),
        }
    }

    /// Drives an ordered slice of resources. A fatal failure on one string is
    /// logged and skipped; it never affects the others.
    pub async fn rewrite_all(&self, resources: &[StringResource]) -> Vec<StringPatch> {
        let mut patches = Vec::new();
        for resource in resources {
            match self.rewrite_resource(resource).await {
                Ok(Some(patch)) => patches.push(patch),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, text = %resource.text, "skipped string");
                }
            }
        }
        patches
    }
}
