use rgb::{RGB, RGBA};
use crate::error::{ColorErrorKind::*, InvalidColorError};
use crate::named;

/// The ways a color may be given.
///
/// Conversions from strings pick [`ColorSpec::Hex`] when the string
/// starts with `#` and [`ColorSpec::Name`] otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorSpec {
    /// A color name, see [`named`].
    Name(String),
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.  Alpha is ignored.
    Hex(String),
    /// Components in \[0, 1\].
    Rgb(RGB<f64>),
    /// Components in \[0, 1\].  Alpha is ignored.
    Rgba(RGBA<f64>),
}

impl ColorSpec {
    /// Resolve the descriptor to a RGB color.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB;
    /// use rainbow_plots::ColorSpec;
    /// let c = ColorSpec::from("#ff8000").to_rgb()?;
    /// assert_eq!(c, RGB::new(1., 128. / 255., 0.));
    /// # Ok::<(), rainbow_plots::InvalidColorError>(())
    /// ```
    pub fn to_rgb(&self) -> Result<RGB<f64>, InvalidColorError> {
        match self {
            ColorSpec::Name(name) => {
                if name.starts_with('#') { return parse_hex(name) }
                named::lookup(name)
                    .ok_or_else(|| InvalidColorError::new(name, UnknownName))
            }
            ColorSpec::Hex(hex) => parse_hex(hex),
            ColorSpec::Rgb(c) => check_unit(*c, &[c.r, c.g, c.b]),
            ColorSpec::Rgba(c) => check_unit(c.rgb(), &[c.r, c.g, c.b, c.a]),
        }
    }
}

fn check_unit(c: RGB<f64>, components: &[f64])
              -> Result<RGB<f64>, InvalidColorError> {
    if components.iter().all(|x| (0. ..= 1.).contains(x)) {
        Ok(c)
    } else {
        Err(InvalidColorError::new(format!("{:?}", components), OutOfRange))
    }
}

fn parse_hex(s: &str) -> Result<RGB<f64>, InvalidColorError> {
    let err = || InvalidColorError::new(s, InvalidHex);
    let digits = s.strip_prefix('#').ok_or_else(err)?.as_bytes();
    let nibble = |c: u8| -> Result<u8, InvalidColorError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(err()),
        }
    };
    let rgb: [u8; 3] = match digits.len() {
        3 | 4 => {
            let mut rgb = [0; 3];
            for (x, &d) in rgb.iter_mut().zip(digits) {
                *x = 17 * nibble(d)?;
            }
            // Validate the alpha digit even though it is dropped.
            if digits.len() == 4 { nibble(digits[3])?; }
            rgb
        }
        6 | 8 => {
            let mut rgb = [0; 3];
            for (x, d) in rgb.iter_mut().zip(digits.chunks(2)) {
                *x = nibble(d[0])? << 4 | nibble(d[1])?;
            }
            if digits.len() == 8 {
                nibble(digits[6])?;
                nibble(digits[7])?;
            }
            rgb
        }
        _ => return Err(err()),
    };
    Ok(RGB { r: rgb[0] as f64 / 255., g: rgb[1] as f64 / 255.,
             b: rgb[2] as f64 / 255. })
}

/// Format a color as `#rrggbb` (components are clamped to \[0, 1\]).
///
/// # Example
///
/// ```
/// use rgb::RGB;
/// assert_eq!(rainbow_plots::to_hex(RGB::new(1., 0.5, 0.)), "#ff8000");
/// ```
pub fn to_hex(c: RGB<f64>) -> String {
    let byte = |x: f64| (255. * x.clamp(0., 1.)).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(c.r), byte(c.g), byte(c.b))
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        if s.starts_with('#') { ColorSpec::Hex(s.to_string()) }
        else { ColorSpec::Name(s.to_string()) }
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        if s.starts_with('#') { ColorSpec::Hex(s) } else { ColorSpec::Name(s) }
    }
}

impl From<&String> for ColorSpec {
    fn from(s: &String) -> Self { ColorSpec::from(s.as_str()) }
}

impl From<RGB<f64>> for ColorSpec {
    fn from(c: RGB<f64>) -> Self { ColorSpec::Rgb(c) }
}

impl From<RGBA<f64>> for ColorSpec {
    fn from(c: RGBA<f64>) -> Self { ColorSpec::Rgba(c) }
}

impl From<[f64; 3]> for ColorSpec {
    fn from([r, g, b]: [f64; 3]) -> Self { ColorSpec::Rgb(RGB { r, g, b }) }
}

impl From<(f64, f64, f64)> for ColorSpec {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        ColorSpec::Rgb(RGB { r, g, b })
    }
}

impl From<[f64; 4]> for ColorSpec {
    fn from([r, g, b, a]: [f64; 4]) -> Self {
        ColorSpec::Rgba(RGBA { r, g, b, a })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorErrorKind;

    fn kind(c: impl Into<ColorSpec>) -> ColorErrorKind {
        c.into().to_rgb().unwrap_err().kind()
    }

    #[test]
    fn hex_forms() {
        let orange = RGB::new(1., 0x88 as f64 / 255., 0.);
        assert_eq!(ColorSpec::from("#f80").to_rgb(), Ok(orange));
        assert_eq!(ColorSpec::from("#F80c").to_rgb(), Ok(orange));
        assert_eq!(ColorSpec::from("#ff8800").to_rgb(), Ok(orange));
        assert_eq!(ColorSpec::from("#ff880080").to_rgb(), Ok(orange));
    }

    #[test]
    fn bad_hex() {
        assert_eq!(kind("#ff"), InvalidHex);
        assert_eq!(kind("#ff880"), InvalidHex);
        assert_eq!(kind("#gg8800"), InvalidHex);
        assert_eq!(kind("#ff8800zz"), InvalidHex);
        assert_eq!(kind("#"), InvalidHex);
        assert_eq!(kind(ColorSpec::Hex("ff8800".into())), InvalidHex);
    }

    #[test]
    fn names_need_the_table() {
        assert_eq!(ColorSpec::from("navy").to_rgb(),
                   Ok(RGB::new(0., 0., 128. / 255.)));
        // Without `#` a hex string is not a name.
        assert_eq!(kind("ff8800"), UnknownName);
    }

    #[test]
    fn triples() {
        assert_eq!(ColorSpec::from((0.1, 0.2, 0.3)).to_rgb(),
                   Ok(RGB::new(0.1, 0.2, 0.3)));
        assert_eq!(ColorSpec::from([0.1, 0.2, 0.3, 0.5]).to_rgb(),
                   Ok(RGB::new(0.1, 0.2, 0.3)));
        assert_eq!(kind([1.5, 0., 0.]), OutOfRange);
        assert_eq!(kind([0., -0.1, 0.]), OutOfRange);
        assert_eq!(kind([f64::NAN, 0., 0.]), OutOfRange);
        assert_eq!(kind([0., 0., 0., 2.]), OutOfRange);
    }

    #[test]
    fn error_message() {
        let e = ColorSpec::from("blurple").to_rgb().unwrap_err();
        assert_eq!(e.to_string(), "invalid color \"blurple\": unknown color name");
        assert_eq!(e.color(), "blurple");
    }

    #[test]
    fn hex_output() {
        assert_eq!(to_hex(RGB::new(0., 0., 0.)), "#000000");
        assert_eq!(to_hex(RGB::new(1.2, 0.5, -1.)), "#ff8000");
    }
}
