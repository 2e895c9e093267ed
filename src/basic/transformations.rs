use crate::basic::{GridPos, Point};

/// Pixel rectangle the lattice is drawn into
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Top left corner
    pub origin: Point,
    pub size: Point,
}

impl Bounds {
    /// A `side`x`side` square centered on `center`
    pub fn centered(center: Point, side: f32) -> Self {
        let size = Point::square(side);
        Self { origin: center - size / 2., size }
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }
}

/// Center of the (possibly fractional) cell at `pos` in pixel space
pub fn to_pixel(pos: GridPos, bounds: &Bounds, cell_size: f32) -> Point {
    let GridPos { x, y } = pos;
    bounds.origin + Point { x: x as f32, y: y as f32 } * cell_size + Point::square(cell_size / 2.)
}

#[test]
fn test_to_pixel_cell_center() {
    let bounds = Bounds {
        origin: Point { x: 100., y: 100. },
        size: Point::square(550.),
    };
    let pixel = to_pixel(GridPos { x: 2., y: 3. }, &bounds, 55.);
    assert_eq!(pixel, Point { x: 100. + 2. * 55. + 27.5, y: 100. + 3. * 55. + 27.5 });
}

#[test]
fn test_to_pixel_is_affine_between_cells() {
    let bounds = Bounds::centered(Point { x: 640., y: 360. }, 605.);
    let a = to_pixel(GridPos { x: 5., y: 5. }, &bounds, 55.);
    let b = to_pixel(GridPos { x: 6., y: 5. }, &bounds, 55.);
    let mid = to_pixel(GridPos { x: 5.5, y: 5. }, &bounds, 55.);
    assert!((mid.x - (a.x + b.x) / 2.).abs() < 1e-3);
    assert_eq!(mid.y, a.y);
}

#[test]
fn test_centered_bounds() {
    let bounds = Bounds::centered(Point { x: 640., y: 360. }, 604.);
    assert_eq!(bounds.origin, Point { x: 338., y: 58. });
    assert_eq!(bounds.right(), 942.);
    assert_eq!(bounds.bottom(), 662.);
}
