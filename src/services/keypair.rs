use tracing::{info, warn};

use crate::domain::{AppError, Keypair};
use crate::ports::CommandRunner;

/// Resolve the reality keypair.
///
/// A supplied private key wins and must come with its public key. Otherwise the
/// external generator is tried once; if it is missing, fails, or prints
/// something unparsable, a `REPLACE_ME_` placeholder pair is returned.
pub fn resolve_keypair(
    runner: &impl CommandRunner,
    generator: &[String],
    private_key: Option<&str>,
    public_key: Option<&str>,
) -> Result<Keypair, AppError> {
    let private_key = private_key.map(str::trim).filter(|k| !k.is_empty());
    let public_key = public_key.map(str::trim).filter(|k| !k.is_empty());

    if let Some(private_key) = private_key {
        let public_key = public_key.ok_or_else(|| {
            AppError::MissingRequiredInput(
                "reality public key (required when a private key is supplied)".to_string(),
            )
        })?;
        return Ok(Keypair::supplied(private_key, public_key));
    }

    match runner.run(generator) {
        Ok(output) => match Keypair::parse_generator_output(&output) {
            Some(pair) => {
                info!("generated reality keypair");
                Ok(pair)
            }
            None => {
                warn!(output = %output, "keypair generator output not recognized; using placeholder");
                Ok(Keypair::fallback())
            }
        },
        Err(err @ (AppError::CommandNotFound(_) | AppError::CommandFailed { .. })) => {
            warn!(error = %err, "keypair generator unavailable; using placeholder");
            Ok(Keypair::fallback())
        }
        Err(err) => Err(err),
    }
}
