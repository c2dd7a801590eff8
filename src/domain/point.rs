/// An input sample: longitude, latitude and the scalar value being contoured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    /// Longitude in degrees
    pub x: f64,
    /// Latitude in degrees
    pub y: f64,
    /// Scalar value (elevation, depth, temperature...)
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same latitude and value, longitude shifted by `dx`
    pub fn shifted_x(&self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_x() {
        let p = Point3D::new(0.5, 10.0, 5.0);
        assert_eq!(p.shifted_x(360.0), Point3D::new(360.5, 10.0, 5.0));
    }
}
