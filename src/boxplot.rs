//! Rainbow box plots.
//!
//! Each class of a [`Samples`] set is drawn as a box whose color is
//! taken from [`RGBColor::rainbow`].  The box is filled with that color
//! lightened by half and outlined, as are its whiskers, caps, median
//! and fliers, with the color itself.  The figure has a white grid
//! style: horizontal grid lines, no frame but the bottom axis line.

use std::{fs::File, io::{BufWriter, Write}, path::Path};
use log::{debug, info, warn};
use rgb::RGB;
use crate::{RGBColor, lighten,
            descriptor::to_hex,
            error::{Error, Result},
            stats::{BoxStats, Samples},
            svg::{Stroke, Svg}};

const GRID_COLOR: &str = "#cccccc";
const MAX_TICKS: usize = 8;
/// Font size of tick labels, in points.
const FONT_SIZE: f64 = 10.;
// Axes position as fractions of the figure (left, right, top, bottom).
const AXES: [f64; 4] = [0.125, 0.9, 0.12, 0.89];

/// Settings of [`rainbow_boxplot`].
#[derive(Clone, Debug)]
pub struct BoxplotOptions {
    figsize: (f64, f64),
    dpi: u32,
    box_width: f64,
    whis: f64,
    linewidth: f64,
    flier_size: f64,
    face_amount: f64,
    edge_amount: f64,
}

impl Default for BoxplotOptions {
    fn default() -> Self {
        BoxplotOptions {
            figsize: (12., 6.),
            dpi: 300,
            box_width: 0.8,
            whis: 1.5,
            linewidth: 1.5,
            flier_size: 3.,
            face_amount: 0.5,
            edge_amount: 1.,
        }
    }
}

impl BoxplotOptions {
    /// Width and height of the figure in inches.  Default: 12 × 6.
    pub fn figsize(mut self, width: f64, height: f64) -> Self {
        self.figsize = (width, height);
        self
    }

    /// Pixels per inch.  Default: `300`.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Width of the boxes, as a fraction of the distance between
    /// classes.  Default: `0.8`.
    pub fn box_width(mut self, width: f64) -> Self {
        self.box_width = width;
        self
    }

    /// Reach of the whiskers in interquartile ranges.  Default: `1.5`.
    pub fn whis(mut self, whis: f64) -> Self {
        self.whis = whis;
        self
    }

    /// Width of the box outlines and whiskers in points.  Default:
    /// `1.5`.
    pub fn linewidth(mut self, linewidth: f64) -> Self {
        self.linewidth = linewidth;
        self
    }

    /// Diameter of the flier markers in points.  Default: `3`.
    pub fn flier_size(mut self, size: f64) -> Self {
        self.flier_size = size;
        self
    }

    /// Lightening amounts (see [`lighten`]) of the box faces and of
    /// the outlines.  Default: `0.5` and `1` (the palette color).
    pub fn amounts(mut self, face: f64, edge: f64) -> Self {
        self.face_amount = face;
        self.edge_amount = edge;
        self
    }

    fn check(&self) -> Result<()> {
        let invalid = |what: &str| Err(Error::InvalidParameter(what.into()));
        let positive = |x: f64| x.is_finite() && x > 0.;
        if !(positive(self.figsize.0) && positive(self.figsize.1)) {
            return invalid("figure size must be positive")
        }
        if self.dpi == 0 { return invalid("dpi must be positive") }
        if !(positive(self.box_width) && self.box_width <= 1.) {
            return invalid("box width must be in ]0, 1]")
        }
        if !(self.whis.is_finite() && self.whis >= 0.) {
            return invalid("whiskers reach must be nonnegative")
        }
        if !(positive(self.linewidth) && positive(self.flier_size)) {
            return invalid("line width and flier size must be positive")
        }
        if !(self.face_amount.is_finite() && self.edge_amount.is_finite()) {
            return invalid("lightening amounts must be finite")
        }
        Ok(())
    }
}

/// Grid values: multiples of 1, 2, 2.5 or 5 times a power of ten, at
/// most about `max` of them in \[`lo`, `hi`\].
fn ticks(lo: f64, hi: f64, max: usize) -> (Vec<f64>, f64) {
    let raw = (hi - lo) / max as f64;
    let mag = 10f64.powf(raw.log10().floor());
    // Rounding errors must not push a value off its grid line.
    const EPS: f64 = 1e-9;
    let step = [1., 2., 2.5, 5., 10.].iter().map(|m| m * mag)
        .find(|&s| s >= raw * (1. - EPS)).unwrap_or(10. * mag);
    let first = (lo / step - EPS).ceil() as i64;
    let last = (hi / step + EPS).floor() as i64;
    ((first ..= last).map(|k| k as f64 * step).collect(), step)
}

fn tick_label(y: f64, step: f64) -> String {
    let decimals = (-step.log10().floor()).max(0.) as usize;
    let decimals = if (step * 10f64.powi(decimals as i32)).fract() == 0. {
        decimals } else { decimals + 1 };
    let s = format!("{:.*}", decimals, y);
    // Avoid "-0".
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

/// Draw a box per class of `data` and save the SVG figure to
/// `filename`.
pub fn rainbow_boxplot(data: &Samples, filename: impl AsRef<Path>,
                       options: &BoxplotOptions) -> Result<()> {
    let filename = filename.as_ref();
    let fh = BufWriter::new(File::create(filename)?);
    let mut fh = write_rainbow_boxplot(fh, data, options)?;
    fh.flush()?;
    info!("wrote {}", filename.display());
    Ok(())
}

/// Write the figure of [`rainbow_boxplot`] to `w` and return it.
pub fn write_rainbow_boxplot<W: Write>(w: W, data: &Samples,
                                       options: &BoxplotOptions) -> Result<W> {
    options.check()?;
    let (lo, hi) = data.bounds().ok_or(Error::EmptyData)?;
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.5 };
    let (ymin, ymax) = (lo - pad, hi + pad);
    let n = data.num_classes();
    debug!("box plot of {n} classes, values in [{lo}, {hi}]");

    let width = options.figsize.0 * options.dpi as f64;
    let height = options.figsize.1 * options.dpi as f64;
    let pt = options.dpi as f64 / 72.;
    let [left, right, top, bottom] =
        [AXES[0] * width, AXES[1] * width, AXES[2] * height, AXES[3] * height];
    // Class `i` is centered on `i`, the axis spans [-0.5, n - 0.5].
    let px = |x: f64| left + (x + 0.5) / n as f64 * (right - left);
    let py = |y: f64| bottom - (y - ymin) / (ymax - ymin) * (bottom - top);

    let mut svg = Svg::begin(w, width, height)?;
    let (grid, step) = ticks(ymin, ymax, MAX_TICKS);
    for y in grid {
        svg.line(left, py(y), right, py(y), Stroke::new(GRID_COLOR, pt))?;
        svg.text(left - 3.5 * pt, py(y), "end", FONT_SIZE * pt,
                 &tick_label(y, step))?;
    }
    svg.line(left, bottom, right, bottom, Stroke::new(GRID_COLOR, 1.25 * pt))?;

    let lw = options.linewidth * pt;
    let half = options.box_width / 2.;
    for (i, (class, color)) in data.classes()
        .zip(RGB::<f64>::rainbow(n)).enumerate() {
        let x = i as f64;
        svg.text(px(x), bottom + 3.5 * pt + FONT_SIZE * pt / 2., "middle",
                 FONT_SIZE * pt, &i.to_string())?;
        let stats = match BoxStats::with_whis(class, options.whis) {
            Ok(s) => s,
            Err(Error::EmptyData) => {
                warn!("class {i} has no data, no box drawn");
                continue
            }
            Err(e) => return Err(e),
        };
        let face = to_hex(lighten(color, options.face_amount)?);
        let edge = to_hex(lighten(color, options.edge_amount)?);
        let stroke = Stroke::new(&edge, lw);
        svg.line(px(x), py(stats.q1), px(x), py(stats.whislo), stroke)?;
        svg.line(px(x), py(stats.q3), px(x), py(stats.whishi), stroke)?;
        svg.rect(px(x - half), py(stats.q3), px(x + half) - px(x - half),
                 py(stats.q1) - py(stats.q3), &face, Some(stroke))?;
        for y in [stats.whislo, stats.whishi] {
            svg.line(px(x - half / 2.), py(y), px(x + half / 2.), py(y),
                     stroke)?;
        }
        svg.line(px(x - half), py(stats.median), px(x + half),
                 py(stats.median), stroke)?;
        for &y in &stats.fliers {
            svg.circle(px(x), py(y), options.flier_size * pt / 2., &edge,
                       Stroke::new(&edge, pt))?;
        }
    }
    Ok(svg.end()?)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks() {
        let (t, step) = ticks(-0.3, 10.2, 6);
        assert_eq!(step, 2.);
        assert_eq!(t, vec![0., 2., 4., 6., 8., 10.]);
        let (t, step) = ticks(-31.7, 9.4, 8);
        assert_eq!(step, 10.);
        assert_eq!(t, vec![-30., -20., -10., 0.]);
        let (t, step) = ticks(0., 1., 5);
        assert!((step - 0.2).abs() < 1e-12, "{step}");
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn labels() {
        assert_eq!(tick_label(-20., 10.), "-20");
        assert_eq!(tick_label(0.5, 0.5), "0.5");
        assert_eq!(tick_label(0.075, 0.025), "0.075");
        assert_eq!(tick_label(-0., 2.5), "0.0");
        assert_eq!(tick_label(5., 2.5), "5.0");
    }

    fn small() -> Samples {
        Samples::new(vec![vec![1., 2., 3., 4., 50.],
                          vec![2., 3., 4.],
                          vec![-20., 0., 1., 2.]])
    }

    #[test]
    fn figure() {
        let options = BoxplotOptions::default().dpi(72);
        let out = write_rainbow_boxplot(Vec::new(), &small(), &options)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("width=\"864\" height=\"432\""));
        // Background and one rectangle per box.
        assert_eq!(out.matches("<rect").count(), 4);
        // 50 and -20 are fliers.
        assert_eq!(out.matches("<circle").count(), 2);
        for c in RGB::<f64>::rainbow(3) {
            let face = to_hex(lighten(c, 0.5).unwrap());
            let edge = to_hex(lighten(c, 1.).unwrap());
            assert!(out.contains(&format!("fill=\"{face}\" stroke=\"{edge}\"")),
                    "{face} {edge}");
        }
        assert!(out.contains(">2</text>"));
    }

    #[test]
    fn empty_class_is_skipped() {
        let data = Samples::new(vec![vec![1., 2.], vec![], vec![3.]]);
        let out = write_rainbow_boxplot(Vec::new(), &data,
                                        &BoxplotOptions::default()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("<rect").count(), 3);
    }

    #[test]
    fn infinite_values_are_dropped() {
        let data = Samples::new(vec![vec![1., f64::INFINITY],
                                     vec![f64::NEG_INFINITY, 2., 3.]]);
        let out = write_rainbow_boxplot(Vec::new(), &data,
                                        &BoxplotOptions::default()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("NaN") && !out.contains("inf"));
        assert_eq!(out.matches("<rect").count(), 3);
        assert_eq!(out.matches("<circle").count(), 0);
        let only_inf = Samples::new(vec![vec![f64::INFINITY]]);
        assert!(matches!(write_rainbow_boxplot(Vec::new(), &only_inf,
                                               &BoxplotOptions::default()),
                         Err(Error::EmptyData)));
    }

    #[test]
    fn errors() {
        let options = BoxplotOptions::default();
        assert!(matches!(write_rainbow_boxplot(Vec::new(), &Samples::default(),
                                               &options),
                         Err(Error::EmptyData)));
        let bad = BoxplotOptions::default().box_width(1.5);
        assert!(matches!(write_rainbow_boxplot(Vec::new(), &small(), &bad),
                         Err(Error::InvalidParameter(_))));
        let bad = BoxplotOptions::default().amounts(f64::NAN, 1.);
        assert!(matches!(write_rainbow_boxplot(Vec::new(), &small(), &bad),
                         Err(Error::InvalidParameter(_))));
    }
}
