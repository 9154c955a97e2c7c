//! texatlas Import
//!
//! Turns a descriptor into host assets:
//! - [`AssetSink`]: the boundary a host engine implements
//! - [`ReimportContext`]: assets from a previous import to reuse
//! - [`AtlasImporter`]: drives a sink through one import pass
//! - [`ManifestSink`]: an in-memory sink that records what it was asked to create

pub mod atlas;
pub mod importer;
pub mod manifest;
pub mod reimport;
pub mod sink;

pub use atlas::*;
pub use importer::*;
pub use manifest::*;
pub use reimport::*;
pub use sink::*;
