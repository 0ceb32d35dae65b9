//! Procedural generation for galaxies, star systems, and planets, plus the orbit
//! contracts their bodies move on.

pub mod orbit;
pub mod planet;
pub mod random;
pub mod star;
pub mod universe;

pub use orbit::*;
pub use planet::*;
pub use random::*;
pub use star::*;
pub use universe::*;
