//! The sRGB palette composition formula
//!
//! Palette entries with a tRNS alpha arrive here already gamma corrected and
//! premultiplied against black. The background contribution is scaled by the
//! remaining coverage and added on top, so a well formed entry never exceeds
//! 255. Malformed palettes can carry a foreground larger than its alpha, which
//! is why the sum is clamped.

use super::error::{Channel, SampleError};

/// One 8-bit channel value
pub type Sample = u8;

/// Composite a premultiplied foreground over a background in sRGB space.
///
/// The background term is rounded to nearest (`+ 127` before dividing by
/// 255) and the sum saturates at 255.
///
/// ```
/// use palette_compose::compose;
///
/// assert_eq!(compose(128, 128, 128), 192);
/// assert_eq!(compose(134, 118, 73), 173);
/// assert_eq!(compose(254, 1, 254), 255);
/// ```
pub fn compose(foreground: Sample, alpha: Sample, background: Sample) -> Sample {
    match alpha {
        0 => background,
        255 => foreground,
        _ => {
            let raw = u32::from(foreground) + background_term(alpha, background);
            raw.min(255) as Sample
        }
    }
}

/// Like [`compose`] but for samples held in wider integers.
///
/// Values above 255 are rejected rather than truncated.
pub fn compose_checked(foreground: u32, alpha: u32, background: u32) -> Result<Sample, SampleError> {
    let foreground = narrow(Channel::Foreground, foreground)?;
    let alpha = narrow(Channel::Alpha, alpha)?;
    let background = narrow(Channel::Background, background)?;
    Ok(compose(foreground, alpha, background))
}

fn narrow(channel: Channel, value: u32) -> Result<Sample, SampleError> {
    Sample::try_from(value).map_err(|_| SampleError::OutOfRange { channel, value })
}

/// Background contribution for a partial alpha, rounded to nearest.
fn background_term(alpha: Sample, background: Sample) -> u32 {
    ((255 - u32::from(alpha)) * u32::from(background) + 127) / 255
}

/// A composition formula under verification.
///
/// The result is a full word so that a candidate which overflows the 8-bit
/// range can be observed doing so.
pub trait Blend {
    /// Short name used in reports
    fn name(&self) -> &'static str;

    fn blend(&self, foreground: Sample, alpha: Sample, background: Sample) -> u32;
}

/// The fixed formula: [`compose`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SrgbCompose;

impl Blend for SrgbCompose {
    fn name(&self) -> &'static str {
        "srgb"
    }

    fn blend(&self, foreground: Sample, alpha: Sample, background: Sample) -> u32 {
        u32::from(compose(foreground, alpha, background))
    }
}

/// The formula as it stood before the clamp was added.
///
/// Kept so the harness can show it catches the overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unclamped;

impl Blend for Unclamped {
    fn name(&self) -> &'static str {
        "unclamped"
    }

    fn blend(&self, foreground: Sample, alpha: Sample, background: Sample) -> u32 {
        match alpha {
            0 => u32::from(background),
            255 => u32::from(foreground),
            _ => u32::from(foreground) + background_term(alpha, background),
        }
    }
}
