pub mod branches;
pub mod commit;
pub mod diff;
pub mod files;
pub mod history;
pub mod hunk;
pub mod session;
pub mod settings;
pub mod status;
pub mod tools;
pub mod watch;

pub use branches::*;
pub use commit::*;
pub use diff::*;
pub use files::*;
pub use history::*;
pub use hunk::*;
pub use settings::*;
pub use status::*;
pub use tools::*;
pub use watch::*;
