//! Frame plans: what a host needs to create one asset per frame.

use serde::{Deserialize, Serialize};

use crate::descriptor::{AtlasDescriptor, FrameEntry};
use crate::error::AtlasError;
use crate::naming::{generate_names, AssetIdentifier};
use crate::uv::{normalize, NormalizedFrame};

/// One frame with its generated identifier and UV bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePlan {
    pub identifier: AssetIdentifier,
    pub uv: NormalizedFrame,
    pub frame: FrameEntry,
}

/// Normalize and name every frame of `descriptor`, in document order.
pub fn plan_frames(descriptor: &AtlasDescriptor) -> Result<Vec<FramePlan>, AtlasError> {
    let identifiers = generate_names(&descriptor.frames);

    descriptor
        .frames
        .iter()
        .zip(identifiers)
        .map(|(frame, identifier)| -> Result<FramePlan, AtlasError> {
            Ok(FramePlan {
                identifier,
                uv: normalize(frame, descriptor.image_size)?,
                frame: frame.clone(),
            })
        })
        .collect()
}
