//! Synthetic samples and box-and-whisker statistics.

use log::{debug, warn};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use crate::error::{Error, Result};

/// Samples of several classes (the columns of a box plot).  Classes
/// may have different lengths, empty ones included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Samples {
    classes: Vec<Vec<f64>>,
}

impl Samples {
    pub fn new(classes: Vec<Vec<f64>>) -> Self { Samples { classes } }

    pub fn num_classes(&self) -> usize { self.classes.len() }

    /// The values of class `i`.  Panics if `i >= self.num_classes()`.
    pub fn class(&self, i: usize) -> &[f64] { &self.classes[i] }

    pub fn classes(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.classes.iter().map(|c| c.as_slice())
    }

    /// Smallest and largest finite value over all classes, if any.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.classes.iter().flatten().filter(|x| x.is_finite())
            .fold(None, |b, &x| match b {
                None => Some((x, x)),
                Some((lo, hi)) => Some((x.min(lo), x.max(hi))),
            })
    }
}

impl From<Vec<Vec<f64>>> for Samples {
    fn from(classes: Vec<Vec<f64>>) -> Self { Samples::new(classes) }
}

/// Draw `num_samples` values for each of `num_classes` classes.  The
/// values of class `i` follow a normal distribution of standard
/// deviation `std` and mean `-x²/2` where `x = i - num_classes/2 + 1/2`,
/// so that the class means describe an arc: a rainbow.
///
/// # Example
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// let mut rng = StdRng::seed_from_u64(0);
/// let data = rainbow_plots::rand_data(30, 100, 3., &mut rng)?;
/// assert_eq!(data.num_classes(), 30);
/// # Ok::<(), rainbow_plots::Error>(())
/// ```
pub fn rand_data<R: Rng + ?Sized>(num_classes: usize, num_samples: usize,
                                  std: f64, rng: &mut R) -> Result<Samples> {
    if !(std.is_finite() && std >= 0.) {
        return Err(Error::InvalidParameter(
            format!("standard deviation must be finite and ≥ 0, got {std}")))
    }
    let half = num_classes as f64 * 0.5;
    let classes = (0 .. num_classes).map(|i| -> Result<Vec<f64>> {
        let x = i as f64 - half + 0.5;
        let normal = Normal::new(-0.5 * x * x, std)
            .map_err(|e| Error::InvalidParameter(e.to_string()))?;
        Ok(normal.sample_iter(&mut *rng).take(num_samples).collect())
    }).collect::<Result<Vec<_>>>()?;
    debug!("drew {num_classes} classes of {num_samples} samples");
    Ok(Samples { classes })
}

/// The statistics drawn by one box of a box plot.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStats {
    pub mean: f64,
    pub median: f64,
    /// First quartile, the bottom of the box.
    pub q1: f64,
    /// Third quartile, the top of the box.
    pub q3: f64,
    /// End of the lower whisker.
    pub whislo: f64,
    /// End of the upper whisker.
    pub whishi: f64,
    /// Values beyond the whiskers.
    pub fliers: Vec<f64>,
}

/// The `p` quantile of the sorted nonempty slice `x`, interpolating
/// linearly between data points.
fn quantile(x: &[f64], p: f64) -> f64 {
    let pos = p * (x.len() - 1) as f64;
    let i = pos.floor() as usize;
    let frac = pos - i as f64;
    if i + 1 < x.len() { x[i] + frac * (x[i + 1] - x[i]) } else { x[i] }
}

impl BoxStats {
    /// Statistics of `data` with whiskers reaching the furthest value
    /// within 1.5 interquartile ranges of the box.
    ///
    /// # Example
    ///
    /// ```
    /// use rainbow_plots::BoxStats;
    /// let s = BoxStats::from_samples(&[1., 2., 3., 4., 50.])?;
    /// assert_eq!((s.q1, s.median, s.q3), (2., 3., 4.));
    /// assert_eq!(s.fliers, vec![50.]);
    /// # Ok::<(), rainbow_plots::Error>(())
    /// ```
    pub fn from_samples(data: &[f64]) -> Result<BoxStats> {
        Self::with_whis(data, 1.5)
    }

    /// Statistics of `data` with whiskers reaching the furthest value
    /// within `whis` interquartile ranges of the box.  NaN and infinite
    /// values are ignored.
    pub fn with_whis(data: &[f64], whis: f64) -> Result<BoxStats> {
        let mut x: Vec<f64> = data.iter().copied()
            .filter(|x| x.is_finite()).collect();
        if x.len() < data.len() {
            warn!("ignoring {} non-finite value(s)", data.len() - x.len());
        }
        if x.is_empty() { return Err(Error::EmptyData) }
        x.sort_by(f64::total_cmp);
        let mean = x.iter().sum::<f64>() / x.len() as f64;
        let q1 = quantile(&x, 0.25);
        let median = quantile(&x, 0.5);
        let q3 = quantile(&x, 0.75);
        let iqr = q3 - q1;
        let lo = q1 - whis * iqr;
        let hi = q3 + whis * iqr;
        let whislo = match x.iter().find(|&&v| v >= lo) {
            Some(&v) if v <= q1 => v,
            _ => q1,
        };
        let whishi = match x.iter().rev().find(|&&v| v <= hi) {
            Some(&v) if v >= q3 => v,
            _ => q3,
        };
        let fliers = x.iter().copied()
            .filter(|&v| v < whislo || v > whishi).collect();
        Ok(BoxStats { mean, median, q1, q3, whislo, whishi, fliers })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn box_stats() {
        let data = [9., 2., 3., 100., 5., 6., 7., 8., 4., 1.];
        let s = BoxStats::from_samples(&data).unwrap();
        assert_eq!(s.q1, 3.25);
        assert_eq!(s.median, 5.5);
        assert_eq!(s.q3, 7.75);
        assert_eq!((s.whislo, s.whishi), (1., 9.));
        assert_eq!(s.fliers, vec![100.]);
        assert_eq!(s.mean, 14.5);
    }

    #[test]
    fn low_fliers() {
        let s = BoxStats::from_samples(&[-50., 10., 11., 12., 13.]).unwrap();
        assert_eq!((s.q1, s.median, s.q3), (10., 11., 12.));
        assert_eq!((s.whislo, s.whishi), (10., 13.));
        assert_eq!(s.fliers, vec![-50.]);
    }

    #[test]
    fn single_value() {
        let s = BoxStats::from_samples(&[2.]).unwrap();
        assert_eq!((s.whislo, s.q1, s.median, s.q3, s.whishi),
                   (2., 2., 2., 2., 2.));
        assert!(s.fliers.is_empty());
    }

    #[test]
    fn empty_and_nan() {
        assert!(matches!(BoxStats::from_samples(&[]), Err(Error::EmptyData)));
        assert!(matches!(BoxStats::from_samples(&[f64::NAN]),
                         Err(Error::EmptyData)));
        let s = BoxStats::from_samples(&[1., f64::NAN, 3.]).unwrap();
        assert_eq!(s.median, 2.);
    }

    #[test]
    fn infinities_are_ignored() {
        let s = BoxStats::from_samples(&[f64::NEG_INFINITY, 1., 2., 3.,
                                         f64::INFINITY]).unwrap();
        assert_eq!((s.whislo, s.median, s.whishi), (1., 2., 3.));
        assert!(s.fliers.is_empty());
        assert!(matches!(BoxStats::from_samples(&[f64::INFINITY]),
                         Err(Error::EmptyData)));
        let s = Samples::new(vec![vec![f64::INFINITY, 2.], vec![f64::NEG_INFINITY]]);
        assert_eq!(s.bounds(), Some((2., 2.)));
        assert_eq!(Samples::new(vec![vec![f64::INFINITY]]).bounds(), None);
    }

    #[test]
    fn rainbow_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let data = rand_data(5, 2000, 0.1, &mut rng).unwrap();
        assert_eq!(data.num_classes(), 5);
        assert!(data.classes().all(|c| c.len() == 2000));
        // x = -2, -1, 0, 1, 2.
        for (i, expected) in [-2., -0.5, 0., -0.5, -2.].into_iter().enumerate() {
            let c = data.class(i);
            let mean = c.iter().sum::<f64>() / c.len() as f64;
            assert!((mean - expected).abs() < 0.02,
                    "class {i}: {mean} ≉ {expected}");
        }
    }

    #[test]
    fn even_class_count_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = rand_data(4, 1, 0., &mut rng).unwrap();
        // x = -1.5, -0.5, 0.5, 1.5.
        let values: Vec<f64> = data.classes().map(|c| c[0]).collect();
        assert_eq!(values, vec![-1.125, -0.125, -0.125, -1.125]);
    }

    #[test]
    fn invalid_std() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(rand_data(3, 10, -1., &mut rng),
                         Err(Error::InvalidParameter(_))));
        assert!(matches!(rand_data(3, 10, f64::NAN, &mut rng),
                         Err(Error::InvalidParameter(_))));
        assert_eq!(rand_data(0, 10, 1., &mut rng).unwrap().num_classes(), 0);
    }

    #[test]
    fn bounds() {
        let s = Samples::new(vec![vec![1., -3.], vec![], vec![f64::NAN, 7.]]);
        assert_eq!(s.bounds(), Some((-3., 7.)));
        assert_eq!(Samples::default().bounds(), None);
    }
}
