pub mod loan;
pub mod notification;

pub use loan::*;
pub use notification::*;
