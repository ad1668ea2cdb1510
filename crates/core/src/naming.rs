//! Illustration naming convention.
//!
//! Generated illustrations are named deterministically from the entry id so
//! a re-run of the pipeline overwrites rather than duplicates.

use crate::types::EntryId;

/// Relative directory (under the public asset root) holding illustrations.
pub const IMAGES_SUBDIR: &str = "images";

/// Zero-padded 3-digit display number for an entry (`7` -> `"007"`).
///
/// Used both in filenames and on rendered cards.
pub fn entry_number(id: EntryId) -> String {
    format!("{id:03}")
}

/// Illustration filename for an entry.
///
/// Convention: `ojisan-<3-digit id>.<ext>` where the extension is chosen
/// from the media type the capability declared: `png` when the type
/// mentions PNG, otherwise `webp`.
///
/// # Examples
///
/// ```
/// use ojisandex_core::naming::illustration_filename;
///
/// assert_eq!(illustration_filename(7, "image/png"), "ojisan-007.png");
/// assert_eq!(illustration_filename(42, "image/jpeg"), "ojisan-042.webp");
/// ```
pub fn illustration_filename(id: EntryId, media_type: &str) -> String {
    let ext = if media_type.to_ascii_lowercase().contains("png") {
        "png"
    } else {
        "webp"
    };
    format!("ojisan-{}.{ext}", entry_number(id))
}

/// Catalog-relative path recorded on the entry for a given filename.
pub fn illustration_rel_path(filename: &str) -> String {
    format!("./{IMAGES_SUBDIR}/{filename}")
}
