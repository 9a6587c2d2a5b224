//! PNG capture of a [`Surface`].
//!
//! Feature-gated behind `png` (default on) so embedders that only blit the
//! raw buffer can depend on this crate without pulling in `image`.

use std::path::Path;

use flowfield_core::error::EffectError;
use flowfield_core::surface::Surface;

/// Writes the surface's RGBA buffer as a PNG.
///
/// Returns `EffectError::InvalidDimensions` for dimensions that do not fit
/// in `u32`, or `EffectError::Io` on encode/write failure.
pub fn write_png(surface: &Surface, path: &Path) -> Result<(), EffectError> {
    let w = u32::try_from(surface.width()).map_err(|_| EffectError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| EffectError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.data().to_vec())
        .ok_or_else(|| EffectError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EffectError::Io(e.to_string()))
}
