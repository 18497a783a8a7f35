use crate::bounds::BoundingBox;

/// Number of vertex slots allocated by [`Cell2D::new`].
pub const INIT_VERTICES: usize = 256;
/// Initial capacity of the deletion stack.
pub const INIT_DELETE_SIZE: usize = 256;
/// Absolute maximum number of vertex slots. Growing past this is fatal.
pub const MAX_VERTICES: usize = 16_777_216;
/// Absolute maximum capacity of the deletion stack. Growing past this is fatal.
pub const MAX_DELETE_SIZE: usize = 16_777_216;
/// Signed distances within this threshold of a cutting plane classify the
/// vertex as lying on the plane. Calibrated against the doubled-coordinate
/// metric used by the vertex arena.
pub const TOLERANCE: f64 = 1e-11;

// Adjacency slot marker for a vertex scheduled for deletion by the
// current cut. Cleared again before `plane` returns.
const TOMBSTONE: usize = usize::MAX;

/// A single 2D Voronoi cell, computed by successive half-plane cuts.
///
/// The boundary is a convex polygon held as a cyclic doubly-linked list in
/// two parallel arenas: `pts` stores coordinate pairs and `ed` stores the
/// successor/predecessor index pair of each vertex. Vertex indices are not
/// stable across cuts; each cut compacts the arenas so that live vertices
/// occupy a contiguous prefix.
///
/// Coordinates are stored at twice their geometric value so that edge
/// midpoints stay exactly representable on half-integer grids. Every query
/// unwinds the scaling on output.
#[derive(Clone)]
pub struct Cell2D {
    /// Number of live vertices. Live vertices occupy indices `0..p`.
    pub(crate) p: usize,
    /// Vertex slot capacity, a power-of-two multiple of [`INIT_VERTICES`].
    current_vertices: usize,
    /// Deletion stack capacity, same growth rule.
    current_delete_size: usize,
    /// Coordinate arena: `[x0, y0, x1, y1, ...]`, doubled coordinates.
    pub(crate) pts: Vec<f64>,
    /// Adjacency arena: `[succ0, pred0, succ1, pred1, ...]`.
    pub(crate) ed: Vec<usize>,
    /// Scratch stack of vertex indices removed by the current cut.
    ds: Vec<usize>,
}

impl Cell2D {
    /// Creates an empty cell with the initial arena capacities. Call
    /// [`init`](Cell2D::init) before cutting.
    pub fn new() -> Cell2D {
        Cell2D {
            p: 0,
            current_vertices: INIT_VERTICES,
            current_delete_size: INIT_DELETE_SIZE,
            pts: vec![0.0; 2 * INIT_VERTICES],
            ed: vec![0; 2 * INIT_VERTICES],
            ds: Vec::with_capacity(INIT_DELETE_SIZE),
        }
    }

    /// Initializes the cell as an axis-aligned rectangle.
    ///
    /// The four corners are stored in counter-clockwise order starting at
    /// `(xmin, ymin)`.
    pub fn init(&mut self, xmin: f64, xmax: f64, ymin: f64, ymax: f64) {
        self.p = 4;
        let (xmin, xmax) = (2.0 * xmin, 2.0 * xmax);
        let (ymin, ymax) = (2.0 * ymin, 2.0 * ymax);
        self.pts[..8].copy_from_slice(&[xmin, ymin, xmax, ymin, xmax, ymax, xmin, ymax]);
        self.ed[..8].copy_from_slice(&[1, 3, 2, 0, 3, 1, 0, 2]);
    }

    /// Initializes the cell to cover the given bounding rectangle.
    pub fn init_bounds(&mut self, bounds: &BoundingBox) {
        self.init(bounds.min[0], bounds.max[0], bounds.min[1], bounds.max[1]);
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.p
    }

    /// Checks whether the cell has been cut away entirely.
    pub fn is_empty(&self) -> bool {
        self.p == 0
    }

    /// Signed distance of vertex `v` from the plane `(x, y, rsq)`, in the
    /// scaled metric. Positive values lie on the side being cut away.
    #[inline]
    fn pos(&self, x: f64, y: f64, rsq: f64, v: usize) -> f64 {
        x * self.pts[2 * v] + y * self.pts[2 * v + 1] - rsq
    }

    /// Doubles the storage of both vertex arenas.
    fn add_memory_vertices(&mut self) {
        self.current_vertices <<= 1;
        if self.current_vertices > MAX_VERTICES {
            panic!(
                "vertex arena allocation ({}) exceeded the absolute maximum of {}",
                self.current_vertices, MAX_VERTICES
            );
        }
        log::debug!("vertex memory scaled up to {}", self.current_vertices);
        self.pts.resize(2 * self.current_vertices, 0.0);
        self.ed.resize(2 * self.current_vertices, 0);
    }

    /// Doubles the capacity of the deletion stack. Indices already on the
    /// stack stay valid across the reallocation.
    fn add_memory_ds(&mut self) {
        self.current_delete_size <<= 1;
        if self.current_delete_size > MAX_DELETE_SIZE {
            panic!(
                "delete stack allocation ({}) exceeded the absolute maximum of {}",
                self.current_delete_size, MAX_DELETE_SIZE
            );
        }
        log::debug!("delete stack memory scaled up to {}", self.current_delete_size);
        self.ds.reserve(self.current_delete_size - self.ds.len());
    }

    /// Cuts the cell by the half-plane of points with `x*X + y*Y > rsq` in
    /// the scaled metric. When cutting against a neighboring particle at
    /// displacement `(x, y)` from the cell's own site, pass
    /// `rsq = x*x + y*y` to cut along the perpendicular bisector.
    ///
    /// Returns `false` if the cut removed the cell entirely, in which case
    /// the cell is left empty and all further cuts are no-ops.
    pub fn plane(&mut self, x: f64, y: f64, rsq: f64) -> bool {
        if self.p == 0 {
            return false;
        }

        // Try to find a vertex inside the cutting region. Starting from
        // vertex 0, walk the boundary uphill on whichever side rises
        // faster. If the walk meets the opposite probe without finding
        // one, the plane misses the cell.
        let mut up = 0;
        let mut u = self.pos(x, y, rsq, up);
        if u < TOLERANCE {
            let mut up2 = self.ed[2 * up];
            let mut u2 = self.pos(x, y, rsq, up2);
            let mut up3 = self.ed[2 * up + 1];
            let mut u3 = self.pos(x, y, rsq, up3);
            if u2 > u3 {
                while u2 < TOLERANCE {
                    up2 = self.ed[2 * up2];
                    u2 = self.pos(x, y, rsq, up2);
                    if up2 == up3 {
                        return true;
                    }
                }
                up = up2;
                u = u2;
            } else {
                while u3 < TOLERANCE {
                    up3 = self.ed[2 * up3 + 1];
                    u3 = self.pos(x, y, rsq, up3);
                    if up2 == up3 {
                        return true;
                    }
                }
                up = up3;
                u = u3;
            }
        }

        // Sweep in the successor direction, stacking every vertex that
        // lies inside the cutting region. Meeting the start again means
        // the whole cell is cut away.
        self.ds.push(up);
        let mut l = u;
        let mut up2 = self.ed[2 * up];
        let mut u2 = self.pos(x, y, rsq, up2);
        while u2 > TOLERANCE {
            if self.ds.len() == self.current_delete_size {
                self.add_memory_ds();
            }
            self.ds.push(up2);
            up2 = self.ed[2 * up2];
            l = u2;
            u2 = self.pos(x, y, rsq, up2);
            if up2 == up {
                self.p = 0;
                self.ds.clear();
                return false;
            }
        }

        // The sweep stopped at `up2`. If it lies on the plane it becomes
        // the cut endpoint as-is; otherwise interpolate a new vertex on
        // the crossing edge.
        let cp;
        if u2 > -TOLERANCE {
            cp = up2;
        } else {
            if self.p == self.current_vertices {
                self.add_memory_vertices();
            }
            let lp = self.ed[2 * up2 + 1];
            let fac = 1.0 / (u2 - l);
            self.pts[2 * self.p] = (self.pts[2 * lp] * u2 - self.pts[2 * up2] * l) * fac;
            self.pts[2 * self.p + 1] =
                (self.pts[2 * lp + 1] * u2 - self.pts[2 * up2 + 1] * l) * fac;
            self.ed[2 * self.p] = up2;
            self.ed[2 * up2 + 1] = self.p;
            cp = self.p;
            self.p += 1;
        }

        // Sweep in the predecessor direction for the rest of the arc.
        l = u;
        let mut up3 = self.ed[2 * up + 1];
        let mut u3 = self.pos(x, y, rsq, up3);
        while u3 > TOLERANCE {
            if self.ds.len() == self.current_delete_size {
                self.add_memory_ds();
            }
            self.ds.push(up3);
            up3 = self.ed[2 * up3 + 1];
            l = u3;
            u3 = self.pos(x, y, rsq, up3);
            if up3 == up2 {
                break;
            }
        }

        // Close the cut: either reconnect the existing endpoint directly,
        // or interpolate the second boundary vertex and splice it in.
        if u3 > TOLERANCE {
            self.ed[2 * cp + 1] = up3;
            self.ed[2 * up3] = cp;
        } else {
            if self.p == self.current_vertices {
                self.add_memory_vertices();
            }
            let lp = self.ed[2 * up3];
            let fac = 1.0 / (u3 - l);
            self.pts[2 * self.p] = (self.pts[2 * lp] * u3 - self.pts[2 * up3] * l) * fac;
            self.pts[2 * self.p + 1] =
                (self.pts[2 * lp + 1] * u3 - self.pts[2 * up3 + 1] * l) * fac;
            self.ed[2 * self.p] = cp;
            self.ed[2 * cp + 1] = self.p;
            self.ed[2 * self.p + 1] = up3;
            self.ed[2 * up3] = self.p;
            self.p += 1;
        }

        // Mark the stacked vertices, then compact: move the live vertex
        // at the top of the arena into each freed slot and patch the
        // neighbors' back-pointers. The inner loop must step `p` past any
        // tombstones in the tail first, so a dead tail vertex is never
        // copied over itself.
        for &s in &self.ds {
            self.ed[2 * s] = TOMBSTONE;
        }
        while let Some(up) = self.ds.pop() {
            self.p -= 1;
            while self.ed[2 * self.p] == TOMBSTONE {
                self.p -= 1;
            }
            if up < self.p {
                let succ = self.ed[2 * self.p];
                let pred = self.ed[2 * self.p + 1];
                self.ed[2 * succ + 1] = up;
                self.ed[2 * pred] = up;
                self.pts[2 * up] = self.pts[2 * self.p];
                self.pts[2 * up + 1] = self.pts[2 * self.p + 1];
                self.ed[2 * up] = succ;
                self.ed[2 * up + 1] = pred;
            } else {
                self.p += 1;
            }
        }
        true
    }

    /// Maximum squared vertex distance from the cell's site, in the scaled
    /// metric. A quarter of this value is the geometric squared radius; a
    /// cutting plane further away than that cannot touch the cell.
    pub fn max_radius_squared(&self) -> f64 {
        let mut r = 0.0;
        for k in 0..self.p {
            let s = self.pts[2 * k] * self.pts[2 * k] + self.pts[2 * k + 1] * self.pts[2 * k + 1];
            if s > r {
                r = s;
            }
        }
        r
    }

    /// Perimeter of the cell, or 0 for an empty cell.
    pub fn perimeter(&self) -> f64 {
        if self.p == 0 {
            return 0.0;
        }
        let mut perim = 0.0;
        let mut k = 0;
        loop {
            let l = self.ed[2 * k];
            let dx = self.pts[2 * k] - self.pts[2 * l];
            let dy = self.pts[2 * k + 1] - self.pts[2 * l + 1];
            perim += (dx * dx + dy * dy).sqrt();
            k = l;
            if k == 0 {
                break;
            }
        }
        0.5 * perim
    }

    /// Area of the cell, or 0 for an empty cell.
    ///
    /// Computed by the shoelace formula over the triangle fan anchored at
    /// vertex 0.
    pub fn area(&self) -> f64 {
        if self.p == 0 {
            return 0.0;
        }
        let x = self.pts[0];
        let y = self.pts[1];
        let mut area = 0.0;
        let mut k = self.ed[0];
        let mut dx1 = self.pts[2 * k] - x;
        let mut dy1 = self.pts[2 * k + 1] - y;
        k = self.ed[2 * k];
        while k != 0 {
            let dx2 = self.pts[2 * k] - x;
            let dy2 = self.pts[2 * k + 1] - y;
            area += dx1 * dy2 - dx2 * dy1;
            dx1 = dx2;
            dy1 = dy2;
            k = self.ed[2 * k];
        }
        0.125 * area
    }

    /// Area-weighted centroid of the cell. Returns `(0, 0)` when the cell
    /// is empty or its area has collapsed below resolution.
    pub fn centroid(&self) -> (f64, f64) {
        if self.p == 0 {
            return (0.0, 0.0);
        }
        let x = self.pts[0];
        let y = self.pts[1];
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut tarea = 0.0;
        let mut k = self.ed[0];
        let mut dx1 = self.pts[2 * k] - x;
        let mut dy1 = self.pts[2 * k + 1] - y;
        k = self.ed[2 * k];
        while k != 0 {
            let dx2 = self.pts[2 * k] - x;
            let dy2 = self.pts[2 * k + 1] - y;
            let area = dx1 * dy2 - dx2 * dy1;
            tarea += area;
            cx += area * (dx1 + dx2);
            cy += area * (dy1 + dy2);
            dx1 = dx2;
            dy1 = dy2;
            k = self.ed[2 * k];
        }
        if tarea.abs() < 1e-9 {
            return (0.0, 0.0);
        }
        let fac = 1.0 / (3.0 * tarea);
        (0.5 * (x + cx * fac), 0.5 * (y + cy * fac))
    }

    /// Geometric vertex coordinates as a flat `[x, y, x, y, ...]` array in
    /// boundary order, starting at vertex 0.
    pub fn vertices(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(2 * self.p);
        if self.p == 0 {
            return out;
        }
        let mut k = 0;
        loop {
            out.push(0.5 * self.pts[2 * k]);
            out.push(0.5 * self.pts[2 * k + 1]);
            k = self.ed[2 * k];
            if k == 0 {
                break;
            }
        }
        out
    }

    /// Verifies the adjacency tables: every successor/predecessor pair
    /// must be mutually consistent, point at live vertices, and form a
    /// single cycle covering all of them.
    pub fn check_relations(&self) -> bool {
        for v in 0..self.p {
            let s = self.ed[2 * v];
            let q = self.ed[2 * v + 1];
            if s >= self.p || q >= self.p {
                return false;
            }
            if self.ed[2 * s + 1] != v || self.ed[2 * q] != v {
                return false;
            }
        }
        if self.p == 0 {
            return true;
        }
        let mut k = self.ed[0];
        let mut n = 1;
        while k != 0 {
            k = self.ed[2 * k];
            n += 1;
            if n > self.p {
                return false;
            }
        }
        n == self.p
    }
}

impl Default for Cell2D {
    fn default() -> Self {
        Cell2D::new()
    }
}
