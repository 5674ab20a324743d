//! Pure data structures owned by the stores, plus the menu catalog.

pub mod cart;
pub mod flags;
pub mod menu;
pub mod order;
pub mod promotion;

pub use cart::*;
pub use flags::*;
pub use menu::*;
pub use order::*;
pub use promotion::*;
