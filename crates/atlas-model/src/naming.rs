//! Identifier generation for frame assets and data-table rows.
//!
//! A frame filename becomes a row name in four steps: drop the extension,
//! replace characters outside `[A-Za-z0-9_]` with `_`, fold underscores
//! into camel case, prefix `_`. Collisions within one run get an
//! increasing numeric suffix, so `["foo.png", "foo.jpg"]` yields
//! `["_foo", "_foo1"]`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::descriptor::FrameEntry;

/// Marker every generated row name starts with.
pub const ROW_NAME_PREFIX: char = '_';

/// A frame's generated name, unique within one import run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIdentifier {
    pub source_file_name: String,
    pub generated_name: String,
}

/// Tracks names already handed out and appends `<separator><n>` on
/// collision, counting from 1.
#[derive(Debug, Clone, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
    separator: String,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suffixes become `<base><separator><n>`.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            taken: HashSet::new(),
            separator: separator.into(),
        }
    }

    /// Reserve a name without suffixing it.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.taken.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Return `base` or the first free suffixed variant, and record it.
    pub fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 0u32;
        while self.taken.contains(&candidate) {
            n += 1;
            candidate = format!("{base}{}{n}", self.separator);
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Name without its last extension. A leading dot does not count as one.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos >= 1 => &file_name[..pos],
        _ => file_name,
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_package_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Drop underscores and uppercase the character right after each one.
/// Other characters keep their case.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Row name before de-duplication: `player_idle.png` → `_playerIdle`.
pub fn base_row_name(source_file_name: &str) -> String {
    let stem = strip_extension(source_file_name);
    let mut name = String::with_capacity(stem.len() + 1);
    name.push(ROW_NAME_PREFIX);
    name.push_str(&camel_case(&sanitize_package_name(stem)));
    name
}

/// Generate one identifier per frame, in order. Names are pairwise
/// distinct; the same input always gives the same output.
pub fn generate_names(frames: &[FrameEntry]) -> Vec<AssetIdentifier> {
    let mut names = UniqueNames::new();
    frames
        .iter()
        .map(|frame| AssetIdentifier {
            source_file_name: frame.source_file_name.clone(),
            generated_name: names.claim(&base_row_name(&frame.source_file_name)),
        })
        .collect()
}

/// Material instance asset name for a frame.
pub fn frame_material_name(atlas_name: &str, frame_name: &str) -> String {
    format!("MIA_{atlas_name}_{frame_name}")
}

/// UI texture asset name for a frame.
pub fn slate_texture_name(atlas_name: &str, frame_name: &str) -> String {
    format!("ST_{atlas_name}_{frame_name}")
}

/// Data table asset name for an atlas.
pub fn data_table_name(atlas_name: &str) -> String {
    format!("{atlas_name}_DataTable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PixelRect;
    use proptest::prelude::*;

    fn frames(names: &[&str]) -> Vec<FrameEntry> {
        names
            .iter()
            .map(|n| FrameEntry::new(*n, PixelRect::new(0, 0, 1, 1)))
            .collect()
    }

    fn generated(names: &[&str]) -> Vec<String> {
        generate_names(&frames(names))
            .into_iter()
            .map(|id| id.generated_name)
            .collect()
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("player_idle.png"), "player_idle");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn test_sanitize_package_name() {
        assert_eq!(sanitize_package_name("ui/button-hover"), "ui_button_hover");
        assert_eq!(sanitize_package_name("héros 2"), "h_ros_2");
        assert_eq!(sanitize_package_name("Already_OK9"), "Already_OK9");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("player_idle"), "playerIdle");
        assert_eq!(camel_case("a__b"), "aB");
        assert_eq!(camel_case("trailing_"), "trailing");
        assert_eq!(camel_case("Mixed_CASE_x"), "MixedCASEX");
    }

    #[test]
    fn test_player_idle_example() {
        assert_eq!(base_row_name("player_idle.png"), "_playerIdle");
        assert_eq!(generated(&["player_idle.png"]), vec!["_playerIdle"]);
    }

    #[test]
    fn test_collisions_get_numeric_suffixes() {
        assert_eq!(generated(&["Foo.png", "Foo.jpg"]), vec!["_Foo", "_Foo1"]);
        assert_eq!(
            generated(&["Foo.png", "Foo1.png", "Foo.jpg"]),
            vec!["_Foo", "_Foo1", "_Foo2"]
        );
        assert_eq!(
            generated(&["a-b.png", "a_b.png", "aB.png"]),
            vec!["_aB", "_aB1", "_aB2"]
        );
    }

    #[test]
    fn test_identifiers_keep_source_names() {
        let ids = generate_names(&frames(&["icons/coin.png", "icons/gem.png"]));
        assert_eq!(ids[0].source_file_name, "icons/coin.png");
        assert_eq!(ids[0].generated_name, "_iconsCoin");
        assert_eq!(ids[1].generated_name, "_iconsGem");
    }

    #[test]
    fn test_unique_names_with_separator() {
        let mut names = UniqueNames::with_separator("_");
        assert_eq!(names.claim("MIA_hud_coin"), "MIA_hud_coin");
        assert_eq!(names.claim("MIA_hud_coin"), "MIA_hud_coin_1");
        assert!(names.contains("MIA_hud_coin_1"));
        assert!(!names.insert("MIA_hud_coin"));
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(frame_material_name("hud", "coin.png"), "MIA_hud_coin.png");
        assert_eq!(slate_texture_name("hud", "coin.png"), "ST_hud_coin.png");
        assert_eq!(data_table_name("hud"), "hud_DataTable");
    }

    proptest! {
        #[test]
        fn prop_names_are_distinct_ordered_and_deterministic(
            names in proptest::collection::vec("[a-zA-Z0-9_.\\- ]{0,12}", 0..40)
        ) {
            let input = frames(&names.iter().map(String::as_str).collect::<Vec<_>>());
            let first = generate_names(&input);
            let second = generate_names(&input);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), input.len());

            let unique: HashSet<_> = first.iter().map(|id| id.generated_name.as_str()).collect();
            prop_assert_eq!(unique.len(), first.len());

            for (id, frame) in first.iter().zip(&input) {
                prop_assert_eq!(&id.source_file_name, &frame.source_file_name);
                prop_assert!(id.generated_name.starts_with(ROW_NAME_PREFIX));
                prop_assert!(id
                    .generated_name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_'));
            }
        }
    }
}
