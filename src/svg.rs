//! Just enough SVG to draw figures.

use std::io::{self, Write};

/// Stroke of a shape: color, width and optional dash pattern (all in
/// pixels).
#[derive(Clone, Copy)]
pub(crate) struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dash: Option<&'a [f64]>,
}

impl<'a> Stroke<'a> {
    pub fn new(color: &'a str, width: f64) -> Self {
        Stroke { color, width, dash: None }
    }

    fn attributes(&self) -> String {
        let mut a = format!("stroke=\"{}\" stroke-width=\"{:.2}\"",
                            self.color, self.width);
        if let Some(dash) = self.dash {
            let dash: Vec<_> = dash.iter().map(|d| format!("{d:.2}")).collect();
            a.push_str(&format!(" stroke-dasharray=\"{}\"", dash.join(",")));
        }
        a
    }
}

/// Escape `s` for use in an attribute value or text content.
pub(crate) fn escape(s: &str) -> String {
    let mut e = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => e.push_str("&amp;"),
            '<' => e.push_str("&lt;"),
            '>' => e.push_str("&gt;"),
            '"' => e.push_str("&quot;"),
            c => e.push(c),
        }
    }
    e
}

/// An SVG document being written to `W`.
pub(crate) struct Svg<W: Write> {
    w: W,
    groups: usize, // open <g> elements
}

impl<W: Write> Svg<W> {
    /// Write the document header for a `width` × `height` pixels
    /// picture with a white background.
    pub fn begin(mut w: W, width: f64, height: f64) -> io::Result<Self> {
        writeln!(w, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                     <svg xmlns=\"http://www.w3.org/2000/svg\" \
                     xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
                     width=\"{width:.0}\" height=\"{height:.0}\" \
                     viewBox=\"0 0 {width:.0} {height:.0}\">")?;
        let mut svg = Svg { w, groups: 0 };
        svg.rect(0., 0., width, height, "white", None)?;
        Ok(svg)
    }

    /// Define the rectangular clip path `id`.
    pub fn clip_rect(&mut self, id: &str, x: f64, y: f64, width: f64,
                     height: f64) -> io::Result<()> {
        writeln!(self.w, "<defs><clipPath id=\"{id}\"><rect x=\"{x:.2}\" \
                          y=\"{y:.2}\" width=\"{width:.2}\" \
                          height=\"{height:.2}\"/></clipPath></defs>")
    }

    /// Open a group clipped by the clip path `id`.
    pub fn begin_clip(&mut self, id: &str) -> io::Result<()> {
        self.groups += 1;
        writeln!(self.w, "<g clip-path=\"url(#{id})\">")
    }

    pub fn end_group(&mut self) -> io::Result<()> {
        self.groups = self.groups.saturating_sub(1);
        writeln!(self.w, "</g>")
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64,
                fill: &str, stroke: Option<Stroke>) -> io::Result<()> {
        write!(self.w, "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" \
                        height=\"{height:.2}\" fill=\"{fill}\"")?;
        if let Some(s) = stroke {
            write!(self.w, " {}", s.attributes())?;
        }
        writeln!(self.w, "/>")
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64,
                stroke: Stroke) -> io::Result<()> {
        writeln!(self.w, "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" \
                          y2=\"{y2:.2}\" {}/>", stroke.attributes())
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str,
                  stroke: Stroke) -> io::Result<()> {
        writeln!(self.w, "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" \
                          fill=\"{fill}\" {}/>", stroke.attributes())
    }

    pub fn polyline(&mut self, points: impl IntoIterator<Item = (f64, f64)>,
                    stroke: Stroke) -> io::Result<()> {
        write!(self.w, "<polyline fill=\"none\" stroke-linejoin=\"round\" {} \
                        points=\"", stroke.attributes())?;
        for (i, (x, y)) in points.into_iter().enumerate() {
            if i > 0 { write!(self.w, " ")?; }
            write!(self.w, "{x:.2},{y:.2}")?;
        }
        writeln!(self.w, "\"/>")
    }

    pub fn image(&mut self, x: f64, y: f64, width: f64, height: f64,
                 href: &str) -> io::Result<()> {
        let href = escape(href);
        writeln!(self.w, "<image x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" \
                          height=\"{height:.2}\" href=\"{href}\" \
                          xlink:href=\"{href}\" preserveAspectRatio=\"none\"/>")
    }

    /// Text whose anchor point is (`x`, `y`); `anchor` is `"start"`,
    /// `"middle"` or `"end"`.
    pub fn text(&mut self, x: f64, y: f64, anchor: &str, size: f64,
                text: &str) -> io::Result<()> {
        writeln!(self.w, "<text x=\"{x:.2}\" y=\"{y:.2}\" \
                          text-anchor=\"{anchor}\" dominant-baseline=\"middle\" \
                          font-family=\"sans-serif\" font-size=\"{size:.2}\" \
                          fill=\"#262626\">{}</text>", escape(text))
    }

    /// Close open groups and the document.  Return the underlying
    /// writer.
    pub fn end(mut self) -> io::Result<W> {
        while self.groups > 0 {
            self.end_group()?;
        }
        writeln!(self.w, "</svg>")?;
        Ok(self.w)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document() {
        let mut svg = Svg::begin(Vec::new(), 100., 50.).unwrap();
        svg.clip_rect("ax", 10., 10., 80., 30.).unwrap();
        svg.begin_clip("ax").unwrap();
        let dash = [2., 1.];
        svg.polyline([(0., 0.), (1.5, 2.)],
                     Stroke { dash: Some(&dash[..]), ..Stroke::new("#ff0000", 1.) })
            .unwrap();
        let out = String::from_utf8(svg.end().unwrap()).unwrap();
        assert!(out.contains("width=\"100\" height=\"50\""));
        assert!(out.contains("points=\"0.00,0.00 1.50,2.00\""));
        assert!(out.contains("stroke-dasharray=\"2.00,1.00\""));
        assert!(out.trim_end().ends_with("</g>\n</svg>"));
    }

    #[test]
    fn escaping() {
        assert_eq!(escape("a&b<\"c\">"), "a&amp;b&lt;&quot;c&quot;&gt;");
    }
}
