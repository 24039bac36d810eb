use serde::{Serialize, Serializer};

/// An opaque sRGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#0066cc`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[cfg(feature = "web")]
impl From<Rgb> for plotters::style::RGBColor {
    fn from(c: Rgb) -> Self {
        plotters::style::RGBColor(c.0, c.1, c.2)
    }
}

pub const PRIMARY: Rgb = Rgb(0x00, 0x66, 0xcc);
pub const SECONDARY: Rgb = Rgb(0x6c, 0x75, 0x7d);
pub const SUCCESS: Rgb = Rgb(0x28, 0xa7, 0x45);
pub const DANGER: Rgb = Rgb(0xdc, 0x35, 0x45);
pub const WARNING: Rgb = Rgb(0xff, 0xc1, 0x07);
pub const INFO: Rgb = Rgb(0x17, 0xa2, 0xb8);
pub const LIGHT: Rgb = Rgb(0xf8, 0xf9, 0xfa);
pub const DARK: Rgb = Rgb(0x34, 0x3a, 0x40);

/// Plain green used for benchmark lines
pub const BENCHMARK: Rgb = Rgb(0x00, 0x80, 0x00);
/// Plain red used for threshold lines
pub const THRESHOLD: Rgb = Rgb(0xff, 0x00, 0x00);

/// Continuous colour scales for bubble charts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    Viridis,
    /// Green for low values, red for high ones
    RdYlGnReversed,
    Reds,
}

impl ColorScale {
    fn stops(&self) -> &'static [Rgb] {
        match self {
            ColorScale::Viridis => &[
                Rgb(0x44, 0x01, 0x54),
                Rgb(0x3b, 0x52, 0x8b),
                Rgb(0x21, 0x90, 0x8c),
                Rgb(0x5d, 0xc8, 0x63),
                Rgb(0xfd, 0xe7, 0x25),
            ],
            ColorScale::RdYlGnReversed => &[
                Rgb(0x00, 0x68, 0x37),
                Rgb(0x66, 0xbd, 0x63),
                Rgb(0xff, 0xff, 0xbf),
                Rgb(0xf4, 0x6d, 0x43),
                Rgb(0xa5, 0x00, 0x26),
            ],
            ColorScale::Reds => &[
                Rgb(0xff, 0xf5, 0xf0),
                Rgb(0xfc, 0xbb, 0xa1),
                Rgb(0xfb, 0x6a, 0x4a),
                Rgb(0xcb, 0x18, 0x1d),
                Rgb(0x67, 0x00, 0x0d),
            ],
        }
    }

    /// Colour at position `t` in `[0, 1]`; values outside are clamped
    pub fn at(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        Rgb::lerp(stops[i], stops[i + 1], scaled - i as f64)
    }

    /// Maps every value onto the scale between the series minimum and maximum
    pub fn map(&self, values: &[f64]) -> Vec<Rgb> {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;

        values
            .iter()
            .map(|v| {
                if span > 0.0 {
                    self.at((v - lo) / span)
                } else {
                    self.at(0.5)
                }
            })
            .collect()
    }
}
