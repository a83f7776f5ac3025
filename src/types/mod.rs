// Wire types returned by the Jira search API. Shared by the engine layer and
// the grid; neither depends on the other.

pub mod issue;

pub use issue::*;
