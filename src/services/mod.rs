pub mod keypair;
pub mod launcher;
pub mod renderer;
pub mod summary;

pub use keypair::resolve_keypair;
pub use launcher::{LaunchResult, LaunchStatus, launch_manifest};
pub use renderer::{GroupRenderer, LoadedGroup, render_to_file, write_artifact};
pub use summary::{CredentialReport, KeypairReport, RunSummary};
