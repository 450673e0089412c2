use rgb::RGB;

const ONE_THIRD: f64 = 1. / 3.;
const ONE_SIXTH: f64 = 1. / 6.;
const TWO_THIRD: f64 = 2. / 3.;

/// A color in the hue, lightness, saturation double-cone.
///
/// All three components are in \[0, 1\] for colors coming from the
/// RGB cube.  Achromatic colors (grays) have `h == s == 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hls {
    /// Hue, a fraction of the color wheel starting at red.
    pub h: f64,
    /// Lightness: 0 is black, 1 is white.
    pub l: f64,
    /// Saturation.
    pub s: f64,
}

impl Hls {
    /// Convert a RGB color with components in \[0, 1\].
    pub fn from_rgb(c: RGB<f64>) -> Hls {
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.;
        if range == 0. {
            return Hls { h: 0., l, s: 0. }
        }
        let s = if l <= 0.5 { range / sum } else { range / (2. - sum) };
        let rc = (max - c.r) / range;
        let gc = (max - c.g) / range;
        let bc = (max - c.b) / range;
        let h = if c.r == max { bc - gc }
                else if c.g == max { 2. + rc - bc }
                else { 4. + gc - rc };
        Hls { h: (h / 6.).rem_euclid(1.), l, s }
    }

    /// Convert back to RGB.
    pub fn to_rgb(&self) -> RGB<f64> {
        let Hls { h, l, s } = *self;
        if s == 0. {
            return RGB { r: l, g: l, b: l }
        }
        let m2 = if l <= 0.5 { l * (1. + s) } else { l + s - l * s };
        let m1 = 2. * l - m2;
        RGB { r: channel(m1, m2, h + ONE_THIRD),
              g: channel(m1, m2, h),
              b: channel(m1, m2, h - ONE_THIRD) }
    }
}

fn channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.);
    if hue < ONE_SIXTH { m1 + (m2 - m1) * hue * 6. }
    else if hue < 0.5 { m2 }
    else if hue < TWO_THIRD { m1 + (m2 - m1) * (TWO_THIRD - hue) * 6. }
    else { m1 }
}
