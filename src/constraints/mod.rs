mod constraint;
mod damped_spring;

pub use self::constraint::Constraint;
pub use self::damped_spring::DampedSpring;
