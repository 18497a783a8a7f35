use std::fmt;
use std::io::{self, Write};

use crate::cell::Cell2D;

/// Formats an `f64` the way C's `%g` conversion does: six significant
/// digits, scientific notation outside the `[1e-4, 1e6)` magnitude range,
/// trailing zeros trimmed.
pub(crate) struct Gf(pub f64);

impl fmt::Display for Gf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            return f.write_str("0");
        }
        if !v.is_finite() {
            return write!(f, "{}", v);
        }
        let exp = v.abs().log10().floor() as i32;
        let s = if !(-4..6).contains(&exp) {
            let s = format!("{:.5e}", v);
            match s.split_once('e') {
                Some((mantissa, e)) => {
                    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                    format!("{}e{}", mantissa, e)
                }
                None => s,
            }
        } else {
            let prec = (5 - exp).max(0) as usize;
            let s = format!("{:.*}", prec, v);
            if s.contains('.') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        };
        f.write_str(&s)
    }
}

impl Cell2D {
    /// Writes the cell boundary in gnuplot format: one `x y` line per
    /// vertex, walking the boundary from vertex 0, then a repeat of the
    /// starting point and a blank separator line. The cell is displaced
    /// by `(dx, dy)`. An empty cell writes nothing.
    pub fn draw_gnuplot<W: Write>(&self, dx: f64, dy: f64, sink: &mut W) -> io::Result<()> {
        if self.p == 0 {
            return Ok(());
        }
        let mut k = 0;
        loop {
            writeln!(
                sink,
                "{} {}",
                Gf(dx + 0.5 * self.pts[2 * k]),
                Gf(dy + 0.5 * self.pts[2 * k + 1])
            )?;
            k = self.ed[2 * k];
            if k == 0 {
                break;
            }
        }
        writeln!(sink, "{} {}", Gf(dx + 0.5 * self.pts[0]), Gf(dy + 0.5 * self.pts[1]))?;
        writeln!(sink)
    }

    /// Writes the cell boundary in POV-Ray format, a `sphere` for each
    /// vertex and a `cylinder` along each edge, displaced by
    /// `(dx, dy, dz)`. An empty cell writes nothing.
    pub fn draw_pov<W: Write>(&self, dx: f64, dy: f64, dz: f64, sink: &mut W) -> io::Result<()> {
        if self.p == 0 {
            return Ok(());
        }
        let mut k = 0;
        loop {
            let x = dx + 0.5 * self.pts[2 * k];
            let y = dy + 0.5 * self.pts[2 * k + 1];
            write!(
                sink,
                "sphere{{<{},{},{}>,r}}\ncylinder{{<{},{},{}>,<",
                Gf(x),
                Gf(y),
                Gf(dz),
                Gf(x),
                Gf(y),
                Gf(dz)
            )?;
            k = self.ed[2 * k];
            writeln!(
                sink,
                "{},{},{}>,r}}",
                Gf(dx + 0.5 * self.pts[2 * k]),
                Gf(dy + 0.5 * self.pts[2 * k + 1]),
                Gf(dz)
            )?;
            if k == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Writes one line describing the cell, driven by a format string of
    /// `%`-introduced control sequences in the style of `printf`.
    ///
    /// Literal characters pass through unchanged, an unknown control
    /// sequence is emitted literally, and a trailing `%` at the end of
    /// the string is discarded silently. The particle id `i`, position
    /// `(x, y)` and radius `r` come from the caller.
    ///
    /// | Code | Output                                        |
    /// |------|-----------------------------------------------|
    /// | `%i` | particle id                                   |
    /// | `%x` | particle x coordinate                         |
    /// | `%y` | particle y coordinate                         |
    /// | `%q` | particle position as `x y`                    |
    /// | `%r` | particle radius                               |
    /// | `%w` | number of cell vertices                       |
    /// | `%m` | squared distance of the furthest vertex       |
    /// | `%p` | cell perimeter                                |
    /// | `%a` | cell area                                     |
    /// | `%c` | cell centroid as `cx cy`                      |
    /// | `%C` | centroid in the frame of the container        |
    pub fn output_custom<W: Write>(
        &self,
        format: &str,
        i: i32,
        x: f64,
        y: f64,
        r: f64,
        sink: &mut W,
    ) -> io::Result<()> {
        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                write!(sink, "{}", c)?;
                continue;
            }
            match chars.next() {
                None => break,
                Some('i') => write!(sink, "{}", i)?,
                Some('x') => write!(sink, "{}", Gf(x))?,
                Some('y') => write!(sink, "{}", Gf(y))?,
                Some('q') => write!(sink, "{} {}", Gf(x), Gf(y))?,
                Some('r') => write!(sink, "{}", Gf(r))?,
                Some('w') => write!(sink, "{}", self.vertex_count())?,
                Some('m') => write!(sink, "{}", Gf(0.25 * self.max_radius_squared()))?,
                Some('p') => write!(sink, "{}", Gf(self.perimeter()))?,
                Some('a') => write!(sink, "{}", Gf(self.area()))?,
                Some('c') => {
                    let (cx, cy) = self.centroid();
                    write!(sink, "{} {}", Gf(cx), Gf(cy))?;
                }
                Some('C') => {
                    let (cx, cy) = self.centroid();
                    write!(sink, "{} {}", Gf(x + cx), Gf(y + cy))?;
                }
                Some(other) => write!(sink, "%{}", other)?,
            }
        }
        writeln!(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g_format() {
        assert_eq!(Gf(0.0).to_string(), "0");
        assert_eq!(Gf(-1.0).to_string(), "-1");
        assert_eq!(Gf(0.5).to_string(), "0.5");
        assert_eq!(Gf(4.0).to_string(), "4");
        assert_eq!(Gf(1.0 / 3.0).to_string(), "0.333333");
        assert_eq!(Gf(123456.0).to_string(), "123456");
        assert_eq!(Gf(1234567.0).to_string(), "1.23457e6");
        assert_eq!(Gf(0.00005).to_string(), "5e-5");
        assert_eq!(Gf(0.0005).to_string(), "0.0005");
    }
}
