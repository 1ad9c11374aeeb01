//! Heat to color and glow mapping
//!
//! Colors come from an ordered table of bands over normalized heat. Each band
//! interpolates between two colors; anything past the last band is saturated.

/// 8-bit RGB
pub type Rgb = [u8; 3];

pub const COLD: Rgb = [10, 10, 10];
pub const WARM: Rgb = [255, 0, 0];
pub const HOT: Rgb = [255, 128, 0];
pub const VERY_HOT: Rgb = [255, 255, 0];

/// Heat at which color and glow saturate
pub const MAX_HEAT: f64 = 3.0;
/// Glow radius at full heat (field units)
pub const BASE_GLOW_RADIUS: f64 = 10.0;
/// Glow alpha at full heat
pub const MAX_GLOW_ALPHA: f64 = 32.0;

/// One interpolation band over `[start, end)` of normalized heat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBand {
    pub start: f64,
    pub end: f64,
    pub from: Rgb,
    pub to: Rgb,
}

impl HeatBand {
    pub const fn new(start: f64, end: f64, from: Rgb, to: Rgb) -> Self {
        Self { start, end, from, to }
    }

    fn color_at(&self, normalized: f64) -> Rgb {
        let t = (normalized - self.start) / (self.end - self.start);
        lerp_rgb(self.from, self.to, t)
    }
}

/// Glow sprite parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glow {
    pub radius: u32,
    pub alpha: u8,
}

/// Linear interpolation per channel, truncating toward zero
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t) as u8;
    [channel(a[0], b[0]), channel(a[1], b[1]), channel(a[2], b[2])]
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatPalette {
    pub max_heat: f64,
    /// Sorted by `start`, contiguous
    pub bands: Vec<HeatBand>,
    /// Color at and beyond the end of the last band
    pub saturated: Rgb,
}

impl Default for HeatPalette {
    fn default() -> Self {
        Self {
            max_heat: MAX_HEAT,
            bands: vec![
                HeatBand::new(0.0, 0.7, COLD, WARM),
                HeatBand::new(0.7, 0.8, WARM, HOT),
                HeatBand::new(0.8, 0.95, HOT, VERY_HOT),
            ],
            saturated: VERY_HOT,
        }
    }
}

impl HeatPalette {
    /// Heat scaled into `[0, 1]`
    pub fn normalize(&self, heat: f64) -> f64 {
        (heat / self.max_heat).clamp(0.0, 1.0)
    }

    pub fn color_for_normalized(&self, normalized: f64) -> Rgb {
        self.bands
            .iter()
            .find(|band| normalized < band.end)
            .map(|band| band.color_at(normalized))
            .unwrap_or(self.saturated)
    }

    pub fn color(&self, heat: f64) -> Rgb {
        self.color_for_normalized(self.normalize(heat))
    }

    pub fn glow(&self, heat: f64) -> Glow {
        let n = self.normalize(heat);
        Glow {
            radius: (BASE_GLOW_RADIUS * n) as u32,
            alpha: (MAX_GLOW_ALPHA * n) as u8,
        }
    }
}
