mod style;
mod shape;
mod updater;
mod space;

pub use self::style::{Color, ShapeStyle};
pub use self::shape::{Shape, ShapeKind, CubicSegment};
pub use self::updater::{Updater, UpdaterHandle};
pub use self::space::{Scene, ShapeStorage};
