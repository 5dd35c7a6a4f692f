//! Spherical geometry utilities for plate placement and grid addressing.
//! All operations on the unit sphere using f64 precision.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// A point (or direction) on the unit sphere in Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Equirectangular inverse projection: `u` ∈ [0,1) maps to longitude
    /// `u·2π`, `v` ∈ [0,1] maps to colatitude `v·π` (v = 0 at the north pole).
    pub fn from_uv(u: f64, v: f64) -> Self {
        let lon = u * TAU;
        let colat = v * PI;
        let s = colat.sin();
        Self {
            x: s * lon.cos(),
            y: s * lon.sin(),
            z: colat.cos(),
        }
    }

    /// Inverse of [`from_uv`](Self::from_uv). Longitude is wrapped into [0,1).
    pub fn to_uv(self) -> (f64, f64) {
        let lon = self.y.atan2(self.x).rem_euclid(TAU);
        let colat = self.z.clamp(-1.0, 1.0).acos();
        (lon / TAU, colat / PI)
    }

    pub fn from_latlon(lat_deg: f64, lon_deg: f64) -> Self {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();
        Self {
            x: lat.cos() * lon.cos(),
            y: lat.cos() * lon.sin(),
            z: lat.sin(),
        }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        Self { x: self.x / len, y: self.y / len, z: self.z / len }
    }

    pub fn scale(self, s: f64) -> Self {
        Self { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    pub fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }

    pub fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }

    /// Squared Euclidean (chord) distance. Monotonic in great-circle distance
    /// for unit vectors, so it can replace `acos` in nearest-seed searches.
    pub fn dist_sq(self, other: Self) -> f64 {
        let d = self.sub(other);
        d.dot(d)
    }

    /// Component of `self` lying in the tangent plane at unit vector `at`.
    pub fn tangent_at(self, at: Self) -> Self {
        self.sub(at.scale(self.dot(at)))
    }
}

/// Great-circle distance between two unit vectors, in radians.
pub fn great_circle_distance_rad(a: Vec3, b: Vec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// An orthonormal basis (e1, e2) for the tangent plane at unit vector `p`.
pub fn tangent_basis(p: Vec3) -> (Vec3, Vec3) {
    let helper = if p.z.abs() < 0.9 {
        Vec3::new(0.0, 0.0, 1.0)
    } else {
        Vec3::new(1.0, 0.0, 0.0)
    };
    let e1 = p.cross(helper).normalize();
    let e2 = p.cross(e1).normalize();
    (e1, e2)
}
