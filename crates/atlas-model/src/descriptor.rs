//! Atlas descriptor parsing.
//!
//! A descriptor is the JSON file a sprite packer writes next to the atlas
//! image. The defaults match TexturePacker's exporters:
//!
//! ```json
//! {
//!   "frames": [
//!     { "filename": "player_idle.png", "frame": { "x": 0, "y": 0, "w": 50, "h": 25 } }
//!   ],
//!   "meta": { "image": "atlas.png", "size": { "w": 100, "h": 50 } }
//! }
//! ```
//!
//! `frames` may also be an object keyed by filename (TexturePacker's
//! "JSON (Hash)" flavour). Every key name can be remapped with
//! [`KeyMapping`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use texatlas_common::KeyMapping;

use crate::error::AtlasError;

/// Pixel dimensions of the atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A rectangle in atlas pixel space. `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Whether the rectangle lies entirely inside an image of `size`.
    pub fn fits_within(&self, size: ImageSize) -> bool {
        self.right() <= size.width as u64 && self.bottom() <= size.height as u64
    }
}

/// One named sub-image of the atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Filename of the sprite before packing (e.g. `player_idle.png`).
    pub source_file_name: String,

    /// Where the sprite sits in the atlas.
    pub pixel_rect: PixelRect,

    /// Packed rotated by 90 degrees.
    #[serde(default)]
    pub rotated: bool,

    /// Transparent borders were trimmed before packing.
    #[serde(default)]
    pub trimmed: bool,

    /// Trimmed area relative to the untrimmed sprite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_source_size: Option<PixelRect>,

    /// Untrimmed sprite size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_size: Option<ImageSize>,
}

impl FrameEntry {
    pub fn new(source_file_name: impl Into<String>, pixel_rect: PixelRect) -> Self {
        Self {
            source_file_name: source_file_name.into(),
            pixel_rect,
            rotated: false,
            trimmed: false,
            sprite_source_size: None,
            source_size: None,
        }
    }
}

/// A parsed, validated atlas descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Atlas image filename, relative to the descriptor.
    pub image_file_name: String,

    /// Atlas image size in pixels.
    pub image_size: ImageSize,

    /// Frames in document order.
    pub frames: Vec<FrameEntry>,

    /// Packer that produced the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,

    /// Packer version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Pixel format of the image (e.g. `RGBA8888`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Export scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

impl AtlasDescriptor {
    pub fn new(
        image_file_name: impl Into<String>,
        image_size: ImageSize,
        frames: Vec<FrameEntry>,
    ) -> Self {
        Self {
            image_file_name: image_file_name.into(),
            image_size,
            frames,
            app: None,
            version: None,
            format: None,
            scale: None,
        }
    }

    /// Has an image name and a non-zero size.
    pub fn is_valid(&self) -> bool {
        !self.image_file_name.is_empty() && self.image_size.is_valid()
    }
}

/// Reads descriptor documents with a given key mapping.
///
/// Failures are logged at `error` level unless the parser is silent; the
/// typed error is returned either way. Silent parsers are meant for
/// "can this file be imported?" probes.
#[derive(Debug, Clone, Default)]
pub struct DescriptorParser {
    keys: KeyMapping,
    silent: bool,
    name_for_errors: String,
}

impl DescriptorParser {
    pub fn new(keys: KeyMapping) -> Self {
        Self {
            keys,
            silent: false,
            name_for_errors: String::new(),
        }
    }

    /// Suppress error logging.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Name used in log messages (usually the asset or file name).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name_for_errors = name.into();
        self
    }

    pub fn keys(&self) -> &KeyMapping {
        &self.keys
    }

    /// Parse and validate a descriptor.
    pub fn parse(&self, text: &str) -> Result<AtlasDescriptor, AtlasError> {
        let result = self.parse_document(text);
        if let Err(err) = &result {
            if !self.silent {
                match err {
                    AtlasError::EmptyInput => tracing::error!(
                        atlas = %self.name_for_errors,
                        "Atlas descriptor was empty; this texture atlas cannot be imported"
                    ),
                    _ => tracing::error!(
                        atlas = %self.name_for_errors,
                        error = %err,
                        "Failed to parse texture atlas descriptor"
                    ),
                }
            }
        }
        result
    }

    /// Silent probe: does `text` hold an importable descriptor?
    pub fn can_import(&self, text: &str) -> bool {
        self.clone().silent(true).parse(text).is_ok()
    }

    fn parse_document(&self, text: &str) -> Result<AtlasDescriptor, AtlasError> {
        if text.is_empty() {
            return Err(AtlasError::EmptyInput);
        }

        let root: Value = serde_json::from_str(text)?;
        let root = as_object(&root, "")?;
        let keys = &self.keys;

        let meta = as_object(required(root, &keys.meta, "")?, &keys.meta)?;
        let image_file_name = required_string(meta, &keys.image, &keys.meta)?;
        if image_file_name.is_empty() {
            return Err(AtlasError::missing(join(&keys.meta, &keys.image)));
        }

        let size_path = join(&keys.meta, &keys.size);
        let image_size = self.read_size(required(meta, &keys.size, &keys.meta)?, &size_path)?;
        if !image_size.is_valid() {
            return Err(AtlasError::geometry(format!(
                "`{size_path}` must be positive, got {}x{}",
                image_size.width, image_size.height
            )));
        }

        let frames = match required(root, &keys.frames, "")? {
            Value::Array(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let path = format!("{}[{i}]", keys.frames);
                    self.read_frame(entry, None, &path, image_size)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Value::Object(entries) => entries
                .iter()
                .map(|(name, entry)| {
                    let path = join(&keys.frames, name);
                    self.read_frame(entry, Some(name), &path, image_size)
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(AtlasError::malformed(format!(
                    "`{}` must be an array or an object",
                    keys.frames
                )))
            }
        };

        Ok(AtlasDescriptor {
            image_file_name,
            image_size,
            frames,
            app: optional_text(meta, &keys.app, &keys.meta)?,
            version: optional_text(meta, &keys.version, &keys.meta)?,
            format: optional_text(meta, &keys.format, &keys.meta)?,
            scale: optional_text(meta, &keys.scale, &keys.meta)?,
        })
    }

    fn read_frame(
        &self,
        entry: &Value,
        hash_key: Option<&String>,
        path: &str,
        image_size: ImageSize,
    ) -> Result<FrameEntry, AtlasError> {
        let keys = &self.keys;
        let entry = as_object(entry, path)?;

        // Hash-form entries carry their filename as the key.
        let source_file_name = match (entry.get(&keys.filename), hash_key) {
            (Some(Value::Null) | None, Some(key)) => key.clone(),
            _ => required_string(entry, &keys.filename, path)?,
        };
        if source_file_name.is_empty() {
            return Err(AtlasError::missing(join(path, &keys.filename)));
        }

        let rect_path = join(path, &keys.frame);
        let pixel_rect = self.read_rect(required(entry, &keys.frame, path)?, &rect_path)?;
        if !pixel_rect.fits_within(image_size) {
            return Err(AtlasError::geometry(format!(
                "`{rect_path}` ({}, {}, {}x{}) extends past the {}x{} atlas",
                pixel_rect.x,
                pixel_rect.y,
                pixel_rect.width,
                pixel_rect.height,
                image_size.width,
                image_size.height
            )));
        }

        let sprite_source_size = match optional(entry, &keys.sprite_source_size) {
            Some(value) => Some(self.read_rect(value, &join(path, &keys.sprite_source_size))?),
            None => None,
        };
        let source_size = match optional(entry, &keys.source_size) {
            Some(value) => Some(self.read_size(value, &join(path, &keys.source_size))?),
            None => None,
        };

        Ok(FrameEntry {
            source_file_name,
            pixel_rect,
            rotated: optional_bool(entry, &keys.rotated, path)?,
            trimmed: optional_bool(entry, &keys.trimmed, path)?,
            sprite_source_size,
            source_size,
        })
    }

    fn read_size(&self, value: &Value, path: &str) -> Result<ImageSize, AtlasError> {
        let obj = as_object(value, path)?;
        Ok(ImageSize {
            width: dimension(obj, &self.keys.width, path)?,
            height: dimension(obj, &self.keys.height, path)?,
        })
    }

    fn read_rect(&self, value: &Value, path: &str) -> Result<PixelRect, AtlasError> {
        let keys = &self.keys;
        let obj = as_object(value, path)?;
        Ok(PixelRect {
            x: dimension(obj, &keys.x, path)?,
            y: dimension(obj, &keys.y, path)?,
            width: dimension(obj, &keys.rect_width, path)?,
            height: dimension(obj, &keys.rect_height, path)?,
        })
    }
}

/// Parse a descriptor with the default key mapping, logging failures.
pub fn parse(text: &str) -> Result<AtlasDescriptor, AtlasError> {
    DescriptorParser::default().parse(text)
}

/// Silent probe with the default key mapping.
pub fn can_import(text: &str) -> bool {
    DescriptorParser::default().can_import(text)
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, AtlasError> {
    value.as_object().ok_or_else(|| {
        if path.is_empty() {
            AtlasError::malformed("top-level value must be an object")
        } else {
            AtlasError::malformed(format!("`{path}` must be an object"))
        }
    })
}

/// Present and non-null.
fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a Value, AtlasError> {
    optional(obj, key).ok_or_else(|| AtlasError::missing(join(parent, key)))
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<String, AtlasError> {
    required(obj, key, parent)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AtlasError::malformed(format!("`{}` must be a string", join(parent, key))))
}

/// Optional metadata; numbers are kept in their textual form.
fn optional_text(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<Option<String>, AtlasError> {
    match optional(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(AtlasError::malformed(format!(
            "`{}` must be a string",
            join(parent, key)
        ))),
    }
}

fn optional_bool(obj: &Map<String, Value>, key: &str, parent: &str) -> Result<bool, AtlasError> {
    match optional(obj, key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(AtlasError::malformed(format!(
            "`{}` must be a boolean",
            join(parent, key)
        ))),
    }
}

/// A non-negative pixel quantity. Whole floats (`12.0`) are accepted since
/// some exporters write them.
fn dimension(obj: &Map<String, Value>, key: &str, parent: &str) -> Result<u32, AtlasError> {
    let path = join(parent, key);
    let value = required(obj, key, parent)?;

    let n = if let Some(n) = value.as_i64() {
        n
    } else if let Some(f) = value.as_f64().filter(|f| f.fract() == 0.0) {
        if f < 0.0 {
            return Err(AtlasError::geometry(format!("`{path}` is negative ({f})")));
        }
        if f > u32::MAX as f64 {
            return Err(AtlasError::geometry(format!("`{path}` is out of range ({f})")));
        }
        f as i64
    } else {
        return Err(AtlasError::malformed(format!(
            "`{path}` must be an integer, got {value}"
        )));
    };

    if n < 0 {
        return Err(AtlasError::geometry(format!("`{path}` is negative ({n})")));
    }
    u32::try_from(n).map_err(|_| AtlasError::geometry(format!("`{path}` is out of range ({n})")))
}
