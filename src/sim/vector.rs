//! 2D vector algebra for the physics simulation
//!
//! Thin typed wrappers over `glam::DVec2`. Position, speed, acceleration and
//! force are structurally identical but semantically distinct; the newtypes
//! keep them from being mixed by accident. Conversions between them are
//! explicit (e.g. a force becomes an acceleration only by dividing by mass).

use std::ops::{
    Add, AddAssign, Deref, DerefMut, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

use glam::DVec2;
use serde::{Deserialize, Serialize};

macro_rules! vector2d {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub DVec2);

        impl $name {
            pub const ZERO: Self = Self(DVec2::ZERO);

            #[inline]
            pub const fn new(x: f64, y: f64) -> Self {
                Self(DVec2::new(x, y))
            }
        }

        // Component access (`v.x`, `v.y`) goes through the inner DVec2.
        impl Deref for $name {
            type Target = DVec2;

            #[inline]
            fn deref(&self) -> &DVec2 {
                &self.0
            }
        }

        impl DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut DVec2 {
                &mut self.0
            }
        }

        impl Add for $name {
            type Output = $name;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, scalar: f64) -> Self {
                Self(self.0 * scalar)
            }
        }

        // Division by a zero scalar is not guarded; callers keep divisors
        // (mass in particular) nonzero by construction.
        impl Div<f64> for $name {
            type Output = $name;

            #[inline]
            fn div(self, scalar: f64) -> Self {
                Self(self.0 / scalar)
            }
        }

        impl Neg for $name {
            type Output = $name;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl MulAssign<f64> for $name {
            #[inline]
            fn mul_assign(&mut self, scalar: f64) {
                self.0 *= scalar;
            }
        }

        impl DivAssign<f64> for $name {
            #[inline]
            fn div_assign(&mut self, scalar: f64) {
                self.0 /= scalar;
            }
        }
    };
}

vector2d!(
    /// A point in world space (pixels, y grows downward)
    Position2D
);
vector2d!(
    /// Velocity (pixels per time unit)
    Speed2D
);
vector2d!(
    /// Acceleration accumulated over a single tick
    Acceleration2D
);
vector2d!(
    /// An applied force; becomes acceleration when divided by mass
    Force2D
);

impl Force2D {
    /// F = m·a
    #[inline]
    pub fn from_acceleration(acceleration: Acceleration2D, mass: f64) -> Self {
        Self(acceleration.0 * mass)
    }

    /// a = F/m. Mass must be nonzero (unchecked).
    #[inline]
    pub fn into_acceleration(self, mass: f64) -> Acceleration2D {
        Acceleration2D(self.0 / mass)
    }
}

impl Acceleration2D {
    /// Speed gained when this acceleration acts for `dt`
    #[inline]
    pub fn speed_delta(self, dt: f64) -> Speed2D {
        Speed2D(self.0 * dt)
    }
}

impl Speed2D {
    /// Displacement covered at this speed over `dt`
    #[inline]
    pub fn position_delta(self, dt: f64) -> Position2D {
        Position2D(self.0 * dt)
    }
}
