pub mod bootstrap;
pub mod prompt;
pub mod types;
pub mod wallet;

pub use bootstrap::WalletsController;
pub use prompt::*;
pub use types::*;
pub use wallet::*;
