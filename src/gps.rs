//! GPS track logs in the GPX format.
//!
//! Only tracks are read; routes and waypoints are ignored.  Element
//! names are matched regardless of their namespace so that GPX 1.0
//! and 1.1 files are both accepted.

use std::{fs, path::Path};
use log::{debug, info};
use crate::error::{Error, Result};

/// A recorded position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    /// Latitude in degrees, in \[-90, 90\].
    pub lat: f64,
    /// Longitude in degrees, in \[-180, 180\].
    pub lon: f64,
    /// Elevation in meters, if recorded.
    pub ele: Option<f64>,
}

/// A continuous span of track points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

/// The tracks of a GPX document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gpx {
    pub tracks: Vec<Track>,
}

fn children<'a, 'input: 'a>(node: roxmltree::Node<'a, 'input>, name: &'a str)
                            -> impl Iterator<Item = roxmltree::Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn child_text<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)?
        .text().map(str::trim)
}

fn coordinate(node: roxmltree::Node, name: &str, bound: f64) -> Result<f64> {
    let pos = node.document().text_pos_at(node.range().start);
    let value = node.attribute(name).ok_or_else(|| {
        Error::Gpx(format!("{pos}: track point without \"{name}\""))
    })?;
    match value.trim().parse::<f64>() {
        Ok(x) if (-bound ..= bound).contains(&x) => Ok(x),
        _ => Err(Error::Gpx(format!("{pos}: invalid {name} {value:?}"))),
    }
}

impl Gpx {
    /// Parse a GPX document.
    ///
    /// # Example
    ///
    /// ```
    /// use rainbow_plots::Gpx;
    /// let gpx = Gpx::parse(r#"<gpx><trk><trkseg>
    ///     <trkpt lat="50.45" lon="3.95"/>
    ///     </trkseg></trk></gpx>"#)?;
    /// assert_eq!(gpx.coordinates(), vec![(3.95, 50.45)]);
    /// # Ok::<(), rainbow_plots::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<Gpx> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "gpx" {
            return Err(Error::Gpx(format!(
                "root element is <{}>, expected <gpx>", root.tag_name().name())))
        }
        let mut tracks = vec![];
        for trk in children(root, "trk") {
            let mut segments = vec![];
            for seg in children(trk, "trkseg") {
                let points = children(seg, "trkpt").map(|pt| -> Result<_> {
                    let ele = match child_text(pt, "ele") {
                        Some(e) => Some(e.parse().map_err(|_| {
                            Error::Gpx(format!("invalid elevation {e:?}"))
                        })?),
                        None => None,
                    };
                    Ok(TrackPoint { lat: coordinate(pt, "lat", 90.)?,
                                    lon: coordinate(pt, "lon", 180.)?,
                                    ele })
                }).collect::<Result<Vec<_>>>()?;
                segments.push(Segment { points });
            }
            let name = child_text(trk, "name").map(String::from);
            tracks.push(Track { name, segments });
        }
        debug!("parsed GPX with {} track(s)", tracks.len());
        Ok(Gpx { tracks })
    }

    /// Read and parse the GPX file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Gpx> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Iterate over all points, track after track and segment after
    /// segment.
    pub fn points(&self) -> impl Iterator<Item = &TrackPoint> {
        self.tracks.iter()
            .flat_map(|t| t.segments.iter())
            .flat_map(|s| s.points.iter())
    }

    /// Return the `(longitude, latitude)` pairs of all points.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points().map(|p| (p.lon, p.lat)).collect()
    }
}

/// Load the `(longitude, latitude)` coordinates of one or several GPX
/// files, concatenated in the order of `paths`.
///
/// A single path may be passed as `[path]`.
pub fn load_gps_data<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>)
                                     -> Result<Vec<(f64, f64)>> {
    let mut coordinates = vec![];
    for path in paths {
        let path = path.as_ref();
        let gpx = Gpx::open(path)?;
        let n = coordinates.len();
        coordinates.extend(gpx.points().map(|p| (p.lon, p.lat)));
        info!("{}: {} GPS points", path.display(), coordinates.len() - n);
    }
    Ok(coordinates)
}
