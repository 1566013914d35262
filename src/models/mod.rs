pub mod basket;
pub mod item;
pub mod user;

pub use basket::*;
pub use item::*;
pub use user::*;
