//! Lightened colors, GPS track maps and rainbow box plots.
//!
//! - [`lighten`] and [`RGBColor::lighten`]
//! - [`ColorSpec`]
//!
//! Color ranges ([`ColorRange`]): [`Hue`] and [`LchHue`].
//!
//! The plotting side writes SVG documents: [`gps_plot`] draws a GPS
//! track over OpenStreetMap tiles and [`rainbow_boxplot`] draws one box
//! per class of a [`Samples`] set, each box filled with a lightened
//! version of its [`RGBColor::rainbow`] color.
//!
//! All colors handled by this crate have their components normalized
//! to \[0, 1\].

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::{RGB, RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod hls;
mod descriptor;
mod error;
pub mod named;
pub mod logger;
pub mod gps;
pub mod map;
pub mod stats;
pub mod boxplot;
mod svg;

pub use hls::Hls;
pub use descriptor::{ColorSpec, to_hex};
pub use error::{ColorErrorKind, Error, InvalidColorError, Result};
pub use gps::{load_gps_data, Gpx};
pub use map::{gps_plot, write_gps_plot, GpsPlotOptions, LineStyle};
pub use stats::{rand_data, BoxStats, Samples};
pub use boxplot::{rainbow_boxplot, write_rainbow_boxplot, BoxplotOptions};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with colors.  It is not required
    /// that `a <= b`.
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Range { range: self,  color: PhantomData,
                    a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self,  color: PhantomData,
                    a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    /// Return the float and RGB color of the position `k` (assuming
    /// it is in the range `0 ..= self.last`).
    fn rgb(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, R::rgb(&self.range, 0.))
        } else if k == self.last {
            (self.b, R::rgb(&self.range, 1.))
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let mut x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (x, R::rgb(&self.range, t))
        }
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize {
        if self.i > self.j { 0 } else { self.j - self.i + 1 }
    }
}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 1\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 1\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return the color corresponding to the hue `h` ∈ \[0., 1.\].
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use rainbow_plots::{RGBColor, ColorRange};
    /// let rgb = RGB8::HUE.rgb(0.5);
    /// ```
    const HUE: Hue<Self> = Hue { color: PhantomData };

    /// Hues of constant CIE lightness and chroma (see [`LchHue`]).
    const LCH_HUE: LchHue<Self> = LchHue {
        l: LchHue::<Self>::LIGHTNESS, c: LchHue::<Self>::CHROMA,
        color: PhantomData };

    /// Return `n` colors with evenly spaced hues of equal perceived
    /// lightness, starting at red.  This is the palette of the
    /// rainbow box plot.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use rainbow_plots::RGBColor;
    /// assert_eq!(RGB8::rainbow(30).len(), 30);
    /// ```
    fn rainbow(n: usize) -> Vec<Self> {
        // The hue wheel is closed: drop the last point, equal to the first.
        let mut colors: Vec<_> = Self::LCH_HUE.range(0., 1., n + 1)
            .map(|(_, c)| c).collect();
        colors.pop();
        colors
    }

    /// Return the hue, lightness and saturation of the color.
    fn to_hls(&self) -> Hls { Hls::from_rgb(self.to_rgba().rgb()) }

    /// Lighten the color: its HLS lightness `l` is replaced by
    /// `1 - amount * (1 - l)`.  `amount == 1.` leaves the color
    /// unchanged and `amount == 0.` gives white.  Amounts outside
    /// \[0, 1\] extrapolate.  The alpha component is preserved.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use rainbow_plots::RGBColor;
    /// let red = RGB8::new(255, 0, 0);
    /// assert_eq!(red.lighten(0.5), RGB8::new(255, 128, 128));
    /// ```
    fn lighten(&self, amount: f64) -> Self {
        let rgba = self.to_rgba();
        let hls = Hls::from_rgb(rgba.rgb());
        let hls = Hls { l: 1. - amount * (1. - hls.l), ..hls };
        Self::from_rgba(hls.to_rgb().with_alpha(rgba.a))
    }
}

/// Lighten `color` by `amount`, see [`RGBColor::lighten`].
///
/// `color` may be anything convertible to a [`ColorSpec`]: a color
/// name, a hex string or an RGB(A) triple with components in \[0, 1\].
///
/// # Example
///
/// ```
/// use rainbow_plots::lighten;
/// let c = lighten("red", 0.5)?;
/// assert!((c.g - 0.5).abs() < 1e-12);
/// # Ok::<(), rainbow_plots::InvalidColorError>(())
/// ```
pub fn lighten(color: impl Into<ColorSpec>, amount: f64)
               -> std::result::Result<RGB<f64>, InvalidColorError> {
    let rgb = color.into().to_rgb()?;
    Ok(rgb.lighten(amount))
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { self.with_alpha(1.) }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c.rgb() }
}

// Rounds to the nearest integer, saturating at the bounds.
#[inline]
fn quantize(x: f64, max: f64) -> f64 { (max * x).round().clamp(0., max) }

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 / 255., g: self.g as f64 / 255.,
              b: self.b as f64 / 255., a: 1. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: quantize(c.r, 255.) as u8,  g: quantize(c.g, 255.) as u8,
               b: quantize(c.b, 255.) as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 / 65535., g: self.g as f64 / 65535.,
              b: self.b as f64 / 65535., a: 1. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: quantize(c.r, 65535.) as u16,
                g: quantize(c.g, 65535.) as u16,
                b: quantize(c.b, 65535.) as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 / 255., g: self.g as f64 / 255.,
              b: self.b as f64 / 255., a: self.a as f64 / 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: quantize(c.r, 255.) as u8,  g: quantize(c.g, 255.) as u8,
                b: quantize(c.b, 255.) as u8,  a: quantize(c.a, 255.) as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64 / 65535., g: self.g as f64 / 65535.,
              b: self.b as f64 / 65535., a: self.a as f64 / 65535. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: quantize(c.r, 65535.) as u16,
                 g: quantize(c.g, 65535.) as u16,
                 b: quantize(c.b, 65535.) as u16,
                 a: quantize(c.a, 65535.) as u16 }
    }
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point.  This color space is CIE L*a*b* with polar
/// coordinates.
#[derive(Clone, Copy)]
struct Lch {
    /// The lightness in the range 0. to 100.
    l: f64,
    /// The chroma, in the range 0. to 181.02, but less in practice.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
}

const EPS0: f64 = 6. / 29.;
#[cfg(test)]
const EPS: f64 = EPS0 * EPS0 * EPS0 ;
const TWO_PI: f64 = 2. * PI;

/// sRGB transfer function: linear light in \[0, 1\] to sRGB component.
fn srgb_encode(u: f64) -> f64 {
    if u <= 0.0031308 { 12.92 * u } else { 1.055 * u.powf(1. / 2.4) - 0.055 }
}

#[cfg(test)]
fn srgb_decode(v: f64) -> f64 {
    if v <= 0.04045 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
}

impl Lch {
    /// `c` is an sRGB color.
    #[cfg(test)]
    fn from_rgb(c: RGB<f64>) -> Lch {
        let c = RGB { r: srgb_decode(c.r), g: srgb_decode(c.g),
                      b: srgb_decode(c.b) };
        // See https://github.com/dbuenzli/gg/blob/b8704687d669d139bb4ac7a54115afc7e5caaa55/src/gg.ml#L2926
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let xr = 0.4522795 * c.r + 0.3993744 * c.g + 0.1483460 * c.b;
        let yr = 0.2225105 * c.r + 0.7168863 * c.g + 0.0606032 * c.b;
        let zr = 0.0168820 * c.r + 0.1176865 * c.g + 0.8654315 * c.b;
        let fx = if xr > EPS { xr.powf(C0) } else { C1 * xr + C2 };
        let fy = if yr > EPS { yr.powf(C0) } else { C1 * yr + C2 };
        let fz = if zr > EPS { zr.powf(C0) } else { C1 * zr + C2 };
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = { let h = b.atan2(a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l, c: a.hypot(b), h }
    }

    /// Linear (not gamma encoded) RGB components, possibly out of
    /// \[0, 1\].
    fn to_linear_rgb(&self) -> RGB<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b =  self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let fx1 = if fx > EPS0 { fx * fx * fx } else { C0 * (fx - C1) };
        let fy1 = if fy > EPS0 { fy * fy * fy } else { C0 * (fy - C1) };
        let fz1 = if fz > EPS0 { fz * fz * fz } else { C0 * (fz - C1) };
        let r = 3.0215932  * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906  * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        RGB { r, g, b }
    }
}

/// Hue
///
pub struct Hue<Color> { color: PhantomData<Color> }

impl<Color: RGBColor> ColorRange<Color> for Hue<Color> {
    fn rgb(&self, t: f64) -> Color {
        let t = 6. * t;
        let f = t.fract();
        let ti = t.trunc().rem_euclid(6.);
        let rgba = {
            if ti == 0.      { RGBA{ r: 1., g: f,      b: 0.,      a: 1.} }
            else if ti == 1. { RGBA{ r: 1. - f, g: 1., b: 0.,      a: 1.} }
            else if ti == 2. { RGBA{ r: 0., g: 1.,     b: f,       a: 1.} }
            else if ti == 3. { RGBA{ r: 0., g: 1. - f, b: 1.,      a: 1.} }
            else if ti == 4. { RGBA{ r: f,  g: 0.,     b: 1.,      a: 1.} }
            else             { RGBA{ r: 1., g: 0.,     b: 1. - f,  a: 1.} }
        };
        Color::from_rgba(rgba)
    }
}

/// Hues of constant CIE L\*C\*h lightness and chroma.
///
/// Unlike [`Hue`], the colors of this range all look equally light,
/// which suits categorical data.  Components falling out of the RGB
/// gamut are clipped.
pub struct LchHue<Color> {
    l: f64,
    c: f64,
    color: PhantomData<Color>,
}

impl<Color> LchHue<Color> {
    const LIGHTNESS: f64 = 65.;
    const CHROMA: f64 = 45.;
    // Hue angle of the first color, roughly red.
    const OFFSET: f64 = 0.01 * TWO_PI;
}

impl<Color: RGBColor> ColorRange<Color> for LchHue<Color> {
    fn rgb(&self, t: f64) -> Color {
        let h = (Self::OFFSET + t * TWO_PI).rem_euclid(TWO_PI);
        let RGB { r, g, b } = Lch { l: self.l, c: self.c, h }.to_linear_rgb();
        let enc = |u: f64| srgb_encode(u.clamp(0., 1.));
        Color::from_rgba(RGBA{ r: enc(r), g: enc(g), b: enc(b), a: 1. })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(c0: RGB<f64>, c1: RGB<f64>) -> bool {
        (c0.r - c1.r).abs() <= 1e-12 && (c0.g - c1.g).abs() <= 1e-12
            && (c0.b - c1.b).abs() <= 1e-12
    }

    #[test]
    fn hue_range() {
        for (i, (x, c)) in RGB8::HUE.range(0., 1., 11).enumerate() {
            assert!((x - 0.1 * i as f64).abs() <= 1e-15,
                    "{} ≉ {}", x, 0.1 * i as f64);
            assert_eq!(RGB8::HUE.rgb(x), c);
        }
    }

    #[test]
    fn range_from_both_ends() {
        let mut r = RGB8::HUE.range(0., 1., 3);
        assert_eq!(r.len(), 3);
        assert_eq!(r.next_back().map(|(x, _)| x), Some(1.));
        assert_eq!(r.next().map(|(x, _)| x), Some(0.));
        assert_eq!(r.len(), 1);
        assert_eq!(r.next().map(|(x, _)| x), Some(0.5));
        assert!(r.next().is_none());
        assert_eq!(RGB8::HUE.range(0., 1., 0).count(), 0);
    }

    #[test]
    fn lighten_red_half() {
        let c = lighten("red", 0.5).unwrap();
        assert!(close(c, RGB::new(1., 0.5, 0.5)), "{:?}", c);
    }

    #[test]
    fn lighten_identity() {
        for c in [[0.2, 0.4, 0.6], [1., 1., 0.], [0.9, 0.1, 0.3],
                  [0.5, 0.5, 0.5], [0., 0., 0.], [1., 1., 1.]] {
            let rgb = RGB::new(c[0], c[1], c[2]);
            let l = lighten(c, 1.).unwrap();
            assert!(close(l, rgb), "{:?} ≉ {:?}", l, rgb);
        }
    }

    #[test]
    fn lighten_zero_is_white() {
        for c in ["navy", "#123456", "k", "tab:orange"] {
            let l = lighten(c, 0.).unwrap();
            assert!(close(l, RGB::new(1., 1., 1.)), "{c}: {:?}", l);
        }
    }

    #[test]
    fn lighten_keeps_hue_and_saturation() {
        let c = RGB::new(0.7, 0.2, 0.4);
        let hls = c.to_hls();
        for amount in [0.1, 0.3, 0.5, 0.8, 1.] {
            let l = c.lighten(amount).to_hls();
            assert!((l.h - hls.h).abs() < 1e-9, "hue at {amount}");
            assert!((l.s - hls.s).abs() < 1e-9, "saturation at {amount}");
        }
    }

    #[test]
    fn lightness_monotonic_in_amount() {
        let c = RGB::new(0.1, 0.5, 0.3);
        let mut prev = f64::INFINITY;
        for i in 0 ..= 20 {
            let l = c.lighten(i as f64 / 20.).to_hls().l;
            assert!(l <= prev + 1e-12, "{l} > {prev}");
            prev = l;
        }
    }

    #[test]
    fn lighten_stays_in_unit_cube() {
        for (_, c) in RGB::<f64>::HUE.range(0., 1., 25) {
            for i in 0 ..= 10 {
                let l = c.lighten(i as f64 / 10.);
                for x in [l.r, l.g, l.b] {
                    assert!((-1e-12 ..= 1. + 1e-12).contains(&x), "{:?}", l);
                }
            }
        }
    }

    #[test]
    fn lighten_extrapolates_out_of_range_amounts() {
        let c = lighten((0.2, 0.1, 0.1), 1.5).unwrap();
        let expected = RGB::new(-0.55 / 1.5, -0.275 / 1.5, -0.275 / 1.5);
        assert!((c.r - expected.r).abs() < 1e-9
                && (c.g - expected.g).abs() < 1e-9
                && (c.b - expected.b).abs() < 1e-9, "{:?}", c);
        // Beyond white for negative amounts.
        let c = lighten("gray", -1.).unwrap();
        assert!(c.r > 1. && c.g > 1. && c.b > 1., "{:?}", c);
        // Integer pixels saturate.
        assert_eq!(RGB8::new(51, 25, 25).lighten(1.5), RGB8::new(0, 0, 0));
        assert_eq!(RGB8::new(128, 128, 128).lighten(-1.),
                   RGB8::new(255, 255, 255));
    }

    #[test]
    fn lighten_preserves_alpha() {
        let c = RGBA8::new(0, 0, 255, 100);
        assert_eq!(c.lighten(0.5), RGBA8::new(128, 128, 255, 100));
    }

    #[test]
    fn lighten_invalid_color() {
        let e = lighten("not-a-color", 0.5).unwrap_err();
        assert_eq!(e.kind(), ColorErrorKind::UnknownName);
    }

    #[test]
    fn srgb_lightness() {
        // Mid gray is L* ≈ 53.39, not 75 as it would be for linear light.
        let l = Lch::from_rgb(RGB::new(0.5, 0.5, 0.5)).l;
        assert!((l - 53.39).abs() < 0.05, "{l}");
        let l = Lch::from_rgb(RGB::new(1., 1., 1.)).l;
        assert!((l - 100.).abs() < 1e-3, "{l}");
        for v in [0., 0.002, 0.04, 0.3, 0.8, 1.] {
            assert!((srgb_encode(srgb_decode(v)) - v).abs() < 1e-12, "{v}");
        }
    }

    #[test]
    fn rainbow_lightness_in_srgb() {
        // Standard sRGB → CIE L* (D65), independent of `Lch`.
        let lstar = |c: RGB<f64>| {
            let lin = |v: f64| if v <= 0.04045 { v / 12.92 }
                               else { ((v + 0.055) / 1.055).powf(2.4) };
            let y = 0.2126 * lin(c.r) + 0.7152 * lin(c.g) + 0.0722 * lin(c.b);
            if y > 216. / 24389. { 116. * y.cbrt() - 16. } else { 24389. / 27. * y }
        };
        for c in RGB::<f64>::rainbow(30) {
            let l = lstar(c);
            let clipped = [c.r, c.g, c.b].iter().any(|&x| x <= 0. || x >= 1.);
            let tol = if clipped { 10. } else { 2. };
            assert!((l - 65.).abs() < tol, "{:?}: L* = {l}", c);
        }
    }

    #[test]
    fn rainbow_distinct_and_equally_light() {
        let colors = RGB::<f64>::rainbow(12);
        assert_eq!(colors.len(), 12);
        for w in colors.windows(2) {
            assert!(!close(w[0], w[1]));
        }
        // Unclipped colors keep the requested CIE lightness.
        let mut unclipped = 0;
        for c in colors {
            if [c.r, c.g, c.b].iter().all(|&x| 0. < x && x < 1.) {
                let l = Lch::from_rgb(c).l;
                assert!((l - 65.).abs() < 1e-3, "{l}");
                unclipped += 1;
            }
        }
        assert!(unclipped > 0);
        assert!(RGB8::rainbow(0).is_empty());
    }
}
