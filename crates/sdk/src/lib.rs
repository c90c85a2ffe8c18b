mod gdrive;
mod github;
mod gmail;
mod gsheets;
mod util;
mod ytube;

pub use gdrive::*;
pub use github::*;
pub use gmail::*;
pub use gsheets::*;
pub use util::*;
pub use ytube::*;
