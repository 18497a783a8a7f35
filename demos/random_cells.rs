// Computes the full Voronoi diagram of a set of random sites by cutting
// each cell against the bisector of every other site, and renders the
// result to an SVG file.

use plotters::prelude::*;
use rand::Rng;
use rayon::prelude::*;

use vorotwo::{BoundingBox, Cell2D};

const SITES: usize = 500;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);

    let mut rng = rand::thread_rng();
    let mut sites = Vec::with_capacity(SITES * 2);
    for _ in 0..SITES {
        sites.push(rng.gen_range(bounds.min[0]..bounds.max[0]));
        sites.push(rng.gen_range(bounds.min[1]..bounds.max[1]));
    }

    // Each cell is computed in the frame of its own site, so the seed
    // rectangle is the container shifted by the site position.
    let cells: Vec<Cell2D> = (0..SITES)
        .into_par_iter()
        .map(|i| {
            let gx = sites[i * 2];
            let gy = sites[i * 2 + 1];
            let mut cell = Cell2D::new();
            cell.init(
                bounds.min[0] - gx,
                bounds.max[0] - gx,
                bounds.min[1] - gy,
                bounds.max[1] - gy,
            );
            for j in 0..SITES {
                if i == j {
                    continue;
                }
                let dx = sites[j * 2] - gx;
                let dy = sites[j * 2 + 1] - gy;
                let rsq = dx * dx + dy * dy;
                if rsq >= cell.max_radius_squared() {
                    continue;
                }
                cell.plane(dx, dy, rsq);
            }
            cell
        })
        .collect();

    let root = SVGBackend::new("random_cells.svg", (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(bounds.min[0]..bounds.max[0], bounds.min[1]..bounds.max[1])?;

    for (i, cell) in cells.iter().enumerate() {
        let gx = sites[i * 2];
        let gy = sites[i * 2 + 1];
        let vertices = cell.vertices();
        if vertices.len() < 6 {
            continue;
        }

        let mut poly = Vec::with_capacity(vertices.len() / 2);
        for j in 0..vertices.len() / 2 {
            poly.push((gx + vertices[j * 2], gy + vertices[j * 2 + 1]));
        }

        chart.draw_series(std::iter::once(Polygon::new(
            poly.clone(),
            BLUE.mix(0.1).filled(),
        )))?;
        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(poly, BLACK.mix(0.5))))?;
        chart.draw_series(std::iter::once(Circle::new((gx, gy), 2, RED.filled())))?;
    }

    root.present()?;
    println!("wrote random_cells.svg: {} cells", cells.len());
    Ok(())
}
