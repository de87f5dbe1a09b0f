use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Shell script standing in for the x25519 keypair generator.
pub struct FakeKeygen {
    pub script: PathBuf,
}

impl FakeKeygen {
    pub const PRIVATE_KEY: &'static str = "fake-private-key";
    pub const PUBLIC_KEY: &'static str = "fake-public-key";

    pub fn install(dir: &Path) -> Self {
        fs::create_dir_all(dir).expect("Failed to create fake keygen dir");
        let script = dir.join("fake-keygen");
        let content = format!(
            "#!/bin/sh\necho \"Private key: {}\"\necho \"Public key: {}\"\n",
            Self::PRIVATE_KEY,
            Self::PUBLIC_KEY
        );
        fs::write(&script, content).expect("Failed to write fake keygen");

        let mut perms = fs::metadata(&script).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).expect("Failed to set permissions");

        Self { script }
    }
}
