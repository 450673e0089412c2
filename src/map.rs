//! GPS tracks drawn over OpenStreetMap tiles.
//!
//! Positions are projected with the Web Mercator projection used by
//! slippy map tiles, normalized so that the whole world is the unit
//! square with `y` pointing south.

use std::{f64::consts::PI, fs::File, io::{BufWriter, Write}, path::Path,
          str::FromStr};
use log::{debug, info, warn};
use crate::{descriptor::{ColorSpec, to_hex},
            error::{Error, Result},
            svg::{Stroke, Svg}};

/// Tiles are squares of this many pixels.
pub const TILE_SIZE: u32 = 256;
/// Deepest zoom level served by the OpenStreetMap tile servers.
pub const MAX_ZOOM: u8 = 19;
/// Latitude at which the Web Mercator square ends.
pub const MAX_LATITUDE: f64 = 85.0511287798066;
/// Smallest side of an extent, about 40 meters at the equator.
const MIN_SPAN: f64 = 1e-6;
/// Above this many tiles a figure is likely to be slow to display.
const MANY_TILES: usize = 256;

/// Project (`lon`, `lat`), in degrees, to the unit square.
/// Latitudes are clamped to ±[`MAX_LATITUDE`].
///
/// # Example
///
/// ```
/// use rainbow_plots::map::project;
/// assert_eq!(project(0., 0.), (0.5, 0.5));
/// ```
pub fn project(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lon + 180.) / 360.;
    let y = (1. - (lat.tan() + 1. / lat.cos()).ln() / PI) / 2.;
    (x, y)
}

/// A rectangle of the projected unit square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extent {
    /// The projection of the given longitude and latitude bounds.
    pub fn from_lonlat(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64)
                       -> Extent {
        // North is up: the largest latitude gives the smallest `y`.
        let (xmin, ymax) = project(lon_min, lat_min);
        let (xmax, ymin) = project(lon_max, lat_max);
        Extent { xmin, xmax, ymin, ymax }
    }

    /// The bounding box of the (`lon`, `lat`) `coordinates`, grown on
    /// each side by `frame` times its size.
    pub fn framed(coordinates: &[(f64, f64)], frame: f64) -> Result<Extent> {
        if coordinates.is_empty() { return Err(Error::EmptyTrack) }
        let (mut lon0, mut lon1) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut lat0, mut lat1) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(lon, lat) in coordinates {
            lon0 = lon0.min(lon);  lon1 = lon1.max(lon);
            lat0 = lat0.min(lat);  lat1 = lat1.max(lat);
        }
        let dlon = frame * (lon1 - lon0);
        let dlat = frame * (lat1 - lat0);
        let e = Extent::from_lonlat(lon0 - dlon, lon1 + dlon,
                                    lat0 - dlat, lat1 + dlat);
        Ok(e.with_min_span(MIN_SPAN))
    }

    fn with_min_span(self, span: f64) -> Extent {
        let grow = |a: f64, b: f64| {
            if b - a >= span { (a, b) }
            else { let c = (a + b) / 2.;  (c - span / 2., c + span / 2.) }
        };
        let (xmin, xmax) = grow(self.xmin, self.xmax);
        let (ymin, ymax) = grow(self.ymin, self.ymax);
        Extent { xmin, xmax, ymin, ymax }
    }

    pub fn width(&self) -> f64 { self.xmax - self.xmin }

    pub fn height(&self) -> f64 { self.ymax - self.ymin }

    /// Grow the shorter side (keeping the center) so that
    /// `width / height == aspect`.
    pub fn to_aspect(self, aspect: f64) -> Extent {
        let (w, h) = (self.width(), self.height());
        if w < aspect * h {
            let d = (aspect * h - w) / 2.;
            Extent { xmin: self.xmin - d, xmax: self.xmax + d, ..self }
        } else {
            let d = (w / aspect - h) / 2.;
            Extent { ymin: self.ymin - d, ymax: self.ymax + d, ..self }
        }
    }

    /// Smallest zoom level at which the extent spans at least
    /// `width` pixels of tiles, capped at [`MAX_ZOOM`].
    pub fn zoom_for_width(&self, width: u32) -> u8 {
        (0 ..= MAX_ZOOM)
            .find(|&z| self.width() * tiles_across(z) * TILE_SIZE as f64
                       >= width as f64)
            .unwrap_or(MAX_ZOOM)
    }

    /// The (`x`, `y`) indices of the tiles at `zoom` covering the
    /// extent.
    pub fn tiles(&self, zoom: u8) -> impl Iterator<Item = (u32, u32)> {
        let n = tiles_across(zoom);
        let index = move |t: f64| (t.clamp(0., 1.) * n).floor().min(n - 1.) as u32;
        let (x0, x1) = (index(self.xmin), index(self.xmax));
        let (y0, y1) = (index(self.ymin), index(self.ymax));
        (y0 ..= y1).flat_map(move |y| (x0 ..= x1).map(move |x| (x, y)))
    }
}

fn tiles_across(zoom: u8) -> f64 { (1u64 << zoom) as f64 }

/// How the track line is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// On/off lengths in units of the line width.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(&[3.7, 1.6]),
            LineStyle::Dotted => Some(&[1., 1.65]),
            LineStyle::DashDot => Some(&[6.4, 1.6, 1., 1.6]),
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "solid" | "-" => Ok(LineStyle::Solid),
            "dashed" | "--" => Ok(LineStyle::Dashed),
            "dotted" | ":" => Ok(LineStyle::Dotted),
            "dashdot" | "-." => Ok(LineStyle::DashDot),
            _ => Err(Error::InvalidParameter(format!("line style {s:?}"))),
        }
    }
}

/// Settings of [`gps_plot`].
#[derive(Clone, Debug)]
pub struct GpsPlotOptions {
    frame: f64,
    color: ColorSpec,
    linestyle: LineStyle,
    linewidth: f64,
    dpi: u32,
    figsize: f64,
    tile_width: u32,
    tile_url: String,
}

impl Default for GpsPlotOptions {
    fn default() -> Self {
        GpsPlotOptions {
            frame: 0.25,
            color: ColorSpec::from("r"),
            linestyle: LineStyle::Dashed,
            linewidth: 1.5,
            dpi: 300,
            figsize: 8.,
            tile_width: 500,
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
        }
    }
}

impl GpsPlotOptions {
    /// Margin around the track, as a fraction of its size.  Default:
    /// `0.25`.
    pub fn frame(mut self, frame: f64) -> Self {
        self.frame = frame;
        self
    }

    /// Color of the track.  Default: `"r"`.
    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    /// Default: [`LineStyle::Dashed`].
    pub fn linestyle(mut self, linestyle: LineStyle) -> Self {
        self.linestyle = linestyle;
        self
    }

    /// Width of the track line in points.  Default: `1.5`.
    pub fn linewidth(mut self, linewidth: f64) -> Self {
        self.linewidth = linewidth;
        self
    }

    /// Pixels per inch.  Default: `300`.
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Side of the (square) figure in inches.  Default: `8`.
    pub fn figsize(mut self, inches: f64) -> Self {
        self.figsize = inches;
        self
    }

    /// Minimum number of tile pixels across the map, which selects
    /// the zoom level.  Default: `500`.
    pub fn tile_width(mut self, pixels: u32) -> Self {
        self.tile_width = pixels;
        self
    }

    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders.
    /// Default: the OpenStreetMap standard layer.
    pub fn tile_url(mut self, template: impl Into<String>) -> Self {
        self.tile_url = template.into();
        self
    }

    fn check(&self) -> Result<()> {
        let invalid = |what: &str| Err(Error::InvalidParameter(what.into()));
        if !(self.frame.is_finite() && self.frame >= 0.) {
            return invalid("frame must be a nonnegative number")
        }
        if !(self.figsize.is_finite() && self.figsize > 0.) {
            return invalid("figure size must be positive")
        }
        if !(self.linewidth.is_finite() && self.linewidth > 0.) {
            return invalid("line width must be positive")
        }
        if self.dpi == 0 { return invalid("dpi must be positive") }
        Ok(())
    }

    fn tile_href(&self, z: u8, x: u32, y: u32) -> String {
        self.tile_url.replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Draw the (`lon`, `lat`) `coordinates` over map tiles and save the
/// SVG figure to `filename`.
pub fn gps_plot(coordinates: &[(f64, f64)], filename: impl AsRef<Path>,
                options: &GpsPlotOptions) -> Result<()> {
    let filename = filename.as_ref();
    let fh = BufWriter::new(File::create(filename)?);
    let mut fh = write_gps_plot(fh, coordinates, options)?;
    fh.flush()?;
    info!("wrote {}", filename.display());
    Ok(())
}

/// Write the figure of [`gps_plot`] to `w` and return it.
pub fn write_gps_plot<W: Write>(w: W, coordinates: &[(f64, f64)],
                                options: &GpsPlotOptions) -> Result<W> {
    options.check()?;
    let color = to_hex(options.color.to_rgb()?);
    let extent = Extent::framed(coordinates, options.frame)?.to_aspect(1.);
    let zoom = extent.zoom_for_width(options.tile_width);
    let tiles: Vec<_> = extent.tiles(zoom).collect();
    debug!("{} GPS points, zoom {}, {} tiles", coordinates.len(), zoom,
           tiles.len());
    if tiles.len() > MANY_TILES {
        warn!("the map needs {} tiles", tiles.len());
    }

    let size = options.figsize * options.dpi as f64;
    let pt = options.dpi as f64 / 72.;
    // Axes: a square centered in the figure.
    let margin = 0.1 * size;
    let side = size - 2. * margin;
    let scale = side / extent.width();
    let px = |x: f64| margin + (x - extent.xmin) * scale;
    let py = |y: f64| margin + (y - extent.ymin) * scale;

    let mut svg = Svg::begin(w, size, size)?;
    svg.clip_rect("axes", margin, margin, side, side)?;
    svg.begin_clip("axes")?;
    let n = tiles_across(zoom);
    for (x, y) in tiles {
        let (x0, y0) = (x as f64 / n, y as f64 / n);
        svg.image(px(x0), py(y0), scale / n, scale / n,
                  &options.tile_href(zoom, x, y))?;
    }
    let width = options.linewidth * pt;
    let dash: Option<Vec<f64>> = options.linestyle.dash_pattern()
        .map(|d| d.iter().map(|l| l * width).collect());
    let stroke = Stroke { dash: dash.as_deref(), ..Stroke::new(&color, width) };
    svg.polyline(coordinates.iter().map(|&(lon, lat)| {
        let (x, y) = project(lon, lat);
        (px(x), py(y))
    }), stroke)?;
    svg.end_group()?;
    svg.rect(margin, margin, side, side, "none",
             Some(Stroke::new("black", 0.8 * pt)))?;
    Ok(svg.end()?)
}
