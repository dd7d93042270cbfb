//! `verinfo key-info` command

use anyhow::{Context, Result};

use crate::cli::KeyInfoArgs;
use verinfo::key::read_key_file;
use verinfo::util::Shell;

pub fn execute(args: KeyInfoArgs, shell: &Shell) -> Result<()> {
    let info = read_key_file(&args.file)
        .with_context(|| format!("failed to read strong-name key: {}", args.file.display()))?;

    if shell.is_json() {
        let event = serde_json::json!({
            "reason": "key-info",
            "file": args.file,
            "public-key": info.public_key,
            "public-key-token": info.public_key_token,
        });
        shell.json_event(&event);
        return Ok(());
    }

    println!("Public key: {}", info.public_key);
    println!("Public key token: {}", info.public_key_token);

    Ok(())
}
