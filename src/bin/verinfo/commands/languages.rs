//! `verinfo languages` command

use anyhow::Result;

use crate::cli::LanguagesArgs;
use verinfo::emit::EmitterRegistry;
use verinfo::util::Shell;

pub fn execute(_args: LanguagesArgs, shell: &Shell) -> Result<()> {
    let registry = EmitterRegistry::new();

    if shell.is_json() {
        for backend in registry.all() {
            let event = serde_json::json!({
                "reason": "language",
                "language": backend.language,
                "aliases": backend.language.aliases(),
                "extension": backend.language.file_extension(),
                "description": backend.description,
                "default-namespace": backend.default_namespace,
            });
            shell.json_event(&event);
        }
        return Ok(());
    }

    println!("{:<6} {:<28} {:<5} DESCRIPTION", "NAME", "ALIASES", "EXT");
    for backend in registry.all() {
        println!(
            "{:<6} {:<28} {:<5} {}",
            backend.language.to_string(),
            backend.language.aliases().join(", "),
            backend.language.file_extension(),
            backend.description
        );
    }

    Ok(())
}
