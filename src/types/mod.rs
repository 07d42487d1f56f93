pub mod analysis;
pub mod bar;
pub mod market;
pub mod signals;

pub use analysis::*;
pub use bar::*;
pub use market::*;
pub use signals::*;
