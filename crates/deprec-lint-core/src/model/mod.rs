pub mod assembly;
pub mod declaration;
pub mod span;
pub mod version;

pub use assembly::*;
pub use declaration::*;
pub use span::*;
pub use version::*;
