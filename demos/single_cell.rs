// Cuts a single cell by a ring of tangent planes and writes the result in
// gnuplot format, e.g. for `plot "single_cell.gnu" with lines`.

use std::fs::File;
use std::io::BufWriter;

use vorotwo::Cell2D;

const N: usize = 32;

fn main() -> std::io::Result<()> {
    let mut cell = Cell2D::new();
    cell.init(-1.0, 1.0, -1.0, 1.0);

    for k in 0..N {
        let phi = 2.0 * std::f64::consts::PI * k as f64 / N as f64;
        cell.plane(phi.cos(), phi.sin(), 1.8);
    }
    assert!(cell.check_relations());

    let file = File::create("single_cell.gnu")?;
    let mut out = BufWriter::new(file);
    cell.draw_gnuplot(0.0, 0.0, &mut out)?;

    println!(
        "wrote single_cell.gnu: {} vertices, area {:.6}, perimeter {:.6}",
        cell.vertex_count(),
        cell.area(),
        cell.perimeter()
    );
    Ok(())
}
