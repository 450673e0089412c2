//! Named colors.
//!
//! The names understood are the single-letter base colors (`"r"`,
//! `"k"`, ...), the CSS4 color names, the Tableau colors (`"tab:blue"`,
//! ...) and the color cycle aliases `"C0"` to `"C9"`.  Names are case
//! insensitive.  A string holding a number in \[0, 1\] names the
//! corresponding gray level.

use std::collections::HashMap;
use lazy_static::lazy_static;
use rgb::RGB;

const BASE: [(&str, [f64; 3]); 8] = [
    ("b", [0., 0., 1.]),
    ("g", [0., 0.5, 0.]),
    ("r", [1., 0., 0.]),
    ("c", [0., 0.75, 0.75]),
    ("m", [0.75, 0., 0.75]),
    ("y", [0.75, 0.75, 0.]),
    ("k", [0., 0., 0.]),
    ("w", [1., 1., 1.]),
];

const TABLEAU: [(&str, u32); 10] = [
    ("blue", 0x1f77b4),
    ("orange", 0xff7f0e),
    ("green", 0x2ca02c),
    ("red", 0xd62728),
    ("purple", 0x9467bd),
    ("brown", 0x8c564b),
    ("pink", 0xe377c2),
    ("gray", 0x7f7f7f),
    ("olive", 0xbcbd22),
    ("cyan", 0x17becf),
];

const CSS4: [(&str, u32); 148] = [
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

/// Convert `0xRRGGBB` to a color with components in \[0, 1\].
pub(crate) fn rgb_of_u32(c: u32) -> RGB<f64> {
    let byte = |shift: u32| ((c >> shift) & 0xFF) as f64 / 255.;
    RGB { r: byte(16), g: byte(8), b: byte(0) }
}

lazy_static! {
    static ref COLORS: HashMap<String, RGB<f64>> = {
        let mut m = HashMap::with_capacity(
            BASE.len() + CSS4.len() + 3 * TABLEAU.len() + 1);
        for (name, [r, g, b]) in BASE {
            m.insert(name.to_string(), RGB { r, g, b });
        }
        for (name, c) in CSS4 {
            m.insert(name.to_string(), rgb_of_u32(c));
        }
        for (i, (name, c)) in TABLEAU.into_iter().enumerate() {
            m.insert(format!("tab:{name}"), rgb_of_u32(c));
            m.insert(format!("c{i}"), rgb_of_u32(c));
        }
        m.insert("tab:grey".to_string(), rgb_of_u32(0x7f7f7f));
        m
    };
}

/// Return the color named `name`, if any.
///
/// # Example
///
/// ```
/// use rainbow_plots::named;
/// assert_eq!(named::lookup("Red"), named::lookup("r"));
/// assert!(named::lookup("0.5").is_some());
/// assert!(named::lookup("nope").is_none());
/// ```
pub fn lookup(name: &str) -> Option<RGB<f64>> {
    let name = name.trim();
    if let Some(&c) = COLORS.get(name.to_ascii_lowercase().as_str()) {
        return Some(c)
    }
    gray(name)
}

/// Gray levels are written as a decimal number in \[0, 1\].
fn gray(name: &str) -> Option<RGB<f64>> {
    // Reject "inf", "nan" and friends, which `f64::from_str` accepts.
    if !name.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None
    }
    let x: f64 = name.parse().ok()?;
    if (0. ..= 1.).contains(&x) { Some(RGB { r: x, g: x, b: x }) }
    else { None }
}

/// Iterate over all color names (lowercase), in no particular order.
pub fn names() -> impl Iterator<Item = &'static str> {
    COLORS.keys().map(|k| k.as_str())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        // 8 base, 148 CSS4, 10 Tableau, 10 cycle aliases, "tab:grey".
        assert_eq!(names().count(), 177);
    }

    #[test]
    fn base_and_css() {
        assert_eq!(lookup("r"), Some(RGB::new(1., 0., 0.)));
        assert_eq!(lookup("red"), Some(RGB::new(1., 0., 0.)));
        assert_eq!(lookup("RebeccaPurple"),
                   Some(RGB::new(0x66 as f64 / 255., 0x33 as f64 / 255.,
                                 0x99 as f64 / 255.)));
        assert_eq!(lookup("grey"), lookup("gray"));
        assert_eq!(lookup("g"), Some(RGB::new(0., 0.5, 0.)));
    }

    #[test]
    fn tableau_and_cycle() {
        assert_eq!(lookup("C1"), lookup("tab:orange"));
        assert_eq!(lookup("tab:blue"), Some(rgb_of_u32(0x1f77b4)));
        assert!(lookup("C10").is_none());
    }

    #[test]
    fn grays() {
        assert_eq!(lookup("0.25"), Some(RGB::new(0.25, 0.25, 0.25)));
        assert_eq!(lookup("1"), Some(RGB::new(1., 1., 1.)));
        assert!(lookup("1.5").is_none());
        assert!(lookup("nan").is_none());
        assert!(lookup("").is_none());
    }
}
