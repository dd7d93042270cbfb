//! `verinfo generate` command

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use miette::Diagnostic as _;

use crate::cli::GenerateArgs;
use crate::commands::AlreadyReported;
use verinfo::core::{AdditionalField, GenerationRequest};
use verinfo::key::StrongNameKeySource;
use verinfo::ops::{generate_to_file, GenerateError, GeneratedCode, Generator};
use verinfo::util::config::{global_config_path, load_config, project_config_path, Config};
use verinfo::util::diagnostic::{suggestions, Diagnostic};
use verinfo::util::fs::WriteOutcome;
use verinfo::util::shell::{format_duration, Shell, Status};

pub fn execute(args: GenerateArgs, shell: &Shell) -> Result<()> {
    let start = Instant::now();
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    let config = load_config(
        &global_config_path().unwrap_or_default(),
        &project_config_path(&cwd),
    );

    if args.request.is_none()
        && args.assembly_version.is_none()
        && args.file_version.is_none()
        && args.informational_version.is_none()
        && args.commit_id.is_none()
    {
        shell.diagnostic(
            &Diagnostic::warning("no build facts were given")
                .with_suggestion(suggestions::EMPTY_REQUEST),
        );
    }

    // Relative key paths resolve against the request file's directory.
    let key_base = args
        .request
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| cwd.clone());

    let output = args.output.clone();
    let request = build_request(args, &config)?;

    if request.language.trim().is_empty() {
        bail!("no target language given; pass `--lang` or set `generate.language` in config");
    }

    let generator = Generator::new("verinfo", env!("CARGO_PKG_VERSION"))
        .with_key_source(Box::new(StrongNameKeySource::new().with_base_dir(key_base)));

    let generated = match output {
        Some(ref path) => generate_to_file(&generator, &request, path, &config.retry_policy())
            .map(|result| (result.code, Some(result.outcome))),
        None => generator
            .generate(&request)
            .map(|code| (code, None))
            .map_err(anyhow::Error::from),
    };
    let (code, outcome) = generated.map_err(|e| report_failure(shell, &e))?;

    for diagnostic in code.diagnostics.to_diagnostics() {
        shell.diagnostic(&diagnostic);
    }

    report_success(shell, &code, output.as_deref(), outcome)?;

    if shell.is_verbose() {
        shell.status(
            Status::Finished,
            format!("in {}", format_duration(start.elapsed())),
        );
    }

    let errors = code.diagnostics.errors.len();
    if errors > 0 {
        bail!(
            "{} invalid field{} in request",
            errors,
            if errors == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

/// Layer the request: request file, then config defaults, then flags.
fn build_request(args: GenerateArgs, config: &Config) -> Result<GenerationRequest> {
    let mut request = match args.request {
        Some(ref path) => GenerationRequest::load(path)?,
        None => GenerationRequest::default(),
    };
    config.apply_to(&mut request);

    if let Some(lang) = args.lang {
        request.language = lang;
    }
    if let Some(namespace) = args.namespace {
        request.namespace = Some(namespace);
    }
    if let Some(root) = args.root_namespace {
        request.root_namespace = Some(root);
    }
    if args.emit_non_version_attributes {
        request.emit_non_version_attributes = true;
    }
    if args.no_class {
        request.emit_this_assembly_class = false;
    }

    let build = &mut request.build;
    override_with(&mut build.assembly_version, args.assembly_version);
    override_with(&mut build.assembly_file_version, args.file_version);
    override_with(
        &mut build.assembly_informational_version,
        args.informational_version,
    );
    override_with(&mut build.assembly_name, args.assembly_name);
    override_with(&mut build.assembly_title, args.title);
    override_with(&mut build.assembly_product, args.product);
    override_with(&mut build.assembly_company, args.company);
    override_with(&mut build.assembly_copyright, args.copyright);
    override_with(&mut build.assembly_configuration, args.configuration);
    override_with(&mut build.git_commit_id, args.commit_id);
    override_with(&mut build.git_commit_date, args.commit_date);
    override_with(&mut build.git_commit_author_date, args.commit_author_date);
    override_with(&mut build.prerelease_version, args.prerelease);
    override_with(&mut build.key_container, args.key_container);
    override_with(&mut build.key_file, args.key_file);
    if args.public_release {
        build.public_release = true;
    }

    for spec in &args.fields {
        let field = AdditionalField::parse_spec(spec).map_err(anyhow::Error::msg)?;
        request.additional_fields.push(field);
    }

    Ok(request)
}

fn override_with<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Report a failed generation once, through the shell.
fn report_failure(shell: &Shell, err: &anyhow::Error) -> AlreadyReported {
    let message = format!("{:#}", err);

    if shell.is_json() {
        shell.error(&message);
        return AlreadyReported(message);
    }

    let diagnostic = match err.downcast_ref::<GenerateError>() {
        Some(e) => {
            let mut diagnostic = Diagnostic::error(&message);
            if let Some(help) = e.help() {
                diagnostic = diagnostic.with_context(help.to_string());
            }
            match e {
                GenerateError::NoGenerator { .. } => {
                    diagnostic.with_suggestion(suggestions::UNKNOWN_LANGUAGE)
                }
                GenerateError::InvalidNamespace { .. } => {
                    diagnostic.with_suggestion(suggestions::INVALID_NAMESPACE)
                }
            }
        }
        None => Diagnostic::error(&message)
            .with_context("the generated file was not written")
            .with_suggestion(suggestions::WRITE_FAILED),
    };
    shell.diagnostic(&diagnostic);

    AlreadyReported(message)
}

fn report_success(
    shell: &Shell,
    code: &GeneratedCode,
    output: Option<&Path>,
    outcome: Option<WriteOutcome>,
) -> Result<()> {
    if shell.is_json() {
        let text = output.is_none().then_some(&code.text);
        let event = serde_json::json!({
            "reason": "generated",
            "language": code.language,
            "output": output.map(PathBuf::from),
            "outcome": outcome,
            "fields": code.fields,
            "text": text,
        });
        shell.json_event(&event);
        return Ok(());
    }

    match (output, outcome) {
        (Some(path), Some(WriteOutcome::Unchanged)) => {
            shell.status(Status::Fresh, format!("{} is up to date", path.display()));
        }
        (Some(path), _) => {
            shell.status(
                Status::Generated,
                format!("{} ({})", path.display(), code.language),
            );
        }
        (None, _) => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(code.text.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write generated code to stdout")?;
        }
    }

    Ok(())
}
