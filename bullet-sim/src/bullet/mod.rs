//! Projectile data
//!
//! Plain-data records, the parameter bundles that initialize them, and the
//! generational handles returned to callers.

mod handle;
mod params;
mod record;

pub use handle::BulletHandle;
pub use params::{BulletKind, BulletParams, Faction};
pub use record::{Advance, Bullet};
