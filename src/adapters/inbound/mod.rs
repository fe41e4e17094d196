mod cli;
mod session;

pub use cli::{Cli, Command};
pub use session::{parse_request, run_session, SessionSummary};
