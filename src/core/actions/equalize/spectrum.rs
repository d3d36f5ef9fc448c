use crate::core::data::colour::Colour;

/// Short end of the palette, in nanometres.
pub const SPECTRUM_START_NM: f64 = 400.0;
/// Width of the palette, in nanometres.
pub const SPECTRUM_SPAN_NM: f64 = 300.0;

const GAMMA: f64 = 0.8;

/// Colour for a normalised palette position `t` in `[0, 1]`.
#[must_use]
pub fn spectrum_colour(t: f64) -> Colour {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    wavelength_to_rgb(SPECTRUM_START_NM + SPECTRUM_SPAN_NM * t)
}

/// Approximates the perceived colour of visible light between 380 and 780 nm.
///
/// Piecewise-linear hue ramps with intensity falling off towards both ends of
/// the visible range. Wavelengths outside it are black.
#[must_use]
pub fn wavelength_to_rgb(wavelength_nm: f64) -> Colour {
    let w = wavelength_nm;
    let (r, g, b) = match w {
        w if (380.0..440.0).contains(&w) => ((440.0 - w) / 60.0, 0.0, 1.0),
        w if (440.0..490.0).contains(&w) => (0.0, (w - 440.0) / 50.0, 1.0),
        w if (490.0..510.0).contains(&w) => (0.0, 1.0, (510.0 - w) / 20.0),
        w if (510.0..580.0).contains(&w) => ((w - 510.0) / 70.0, 1.0, 0.0),
        w if (580.0..645.0).contains(&w) => (1.0, (645.0 - w) / 65.0, 0.0),
        w if (645.0..=780.0).contains(&w) => (1.0, 0.0, 0.0),
        _ => return Colour::BLACK,
    };

    let intensity = match w {
        w if w < 420.0 => 0.3 + 0.7 * (w - 380.0) / 40.0,
        w if w > 700.0 => 0.3 + 0.7 * (780.0 - w) / 80.0,
        _ => 1.0,
    };

    Colour {
        r: channel(r, intensity),
        g: channel(g, intensity),
        b: channel(b, intensity),
    }
}

fn channel(value: f64, intensity: f64) -> u8 {
    if value <= 0.0 {
        return 0;
    }
    (255.0 * (value * intensity).powf(GAMMA)).round().clamp(0.0, 255.0) as u8
}
