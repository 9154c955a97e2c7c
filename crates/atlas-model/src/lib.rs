//! texatlas Model
//!
//! Engine-agnostic core of the atlas importer:
//! - **Descriptor:** TexturePacker-style JSON parsed into a validated [`AtlasDescriptor`]
//! - **UV:** pixel rectangles converted to normalized `[0.0, 1.0]` frame bounds
//! - **Naming:** collision-free, identifier-safe names derived from frame filenames
//! - **Plan:** the ordered `(identifier, uv)` list a host turns into assets
//!
//! Everything here is pure and synchronous. File access and asset creation
//! belong to the caller.

pub mod descriptor;
pub mod error;
pub mod naming;
pub mod plan;
pub mod uv;

pub use descriptor::*;
pub use error::*;
pub use naming::*;
pub use plan::*;
pub use uv::*;
