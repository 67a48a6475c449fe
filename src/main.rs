use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use floating_tags::cli::run_workflow;
use floating_tags::config::{self, parse_bool_input, ActionInputs, InputOverrides};
use floating_tags::git::Git2Repository;
use floating_tags::ui::ActionOutputs;
use floating_tags::Logger;

#[derive(clap::Parser)]
#[command(
    name = "floating-tags",
    version,
    about = "Move floating major/minor version tags to the commit of a release tag"
)]
struct Args {
    #[arg(short, long, env = "INPUT_TAG", help = "Tag the version is extracted from (e.g. v1.2.3)")]
    tag: Option<String>,

    #[arg(
        long = "ref-tag",
        env = "INPUT_REF-TAG",
        help = "Reference used only to find the target commit [default: the tag]"
    )]
    ref_tag: Option<String>,

    #[arg(short, long, env = "INPUT_PREFIX", help = "Prefix for floating tag names [default: v]")]
    prefix: Option<String>,

    #[arg(
        long,
        env = "INPUT_UPDATE-MINOR",
        value_parser = parse_bool_input,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Also move the minor floating tag (e.g. v1.2)"
    )]
    update_minor: Option<bool>,

    #[arg(
        long,
        env = "INPUT_IGNORE-PRERELEASE",
        value_parser = parse_bool_input,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Fail instead of tagging when the tag is a prerelease and no separate ref-tag is given"
    )]
    ignore_prerelease: Option<bool>,

    #[arg(
        long,
        env = "INPUT_VERBOSE",
        value_parser = parse_bool_input,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Log every step and verify tags after pushing"
    )]
    verbose: Option<bool>,

    #[arg(long, env = "INPUT_REMOTE", help = "Remote to push tags to [default: origin]")]
    remote: Option<String>,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token used when the remote asks for HTTPS credentials"
    )]
    token: Option<String>,

    #[arg(short = 'C', long, default_value = ".", help = "Path inside the git repository")]
    repository: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let debug = config::detect_debug_mode();
    let annotations = config::running_in_actions();
    init_tracing(debug, annotations);

    let mut logger = Logger::new(false, debug).with_annotations(annotations);
    match run(args, debug, &mut logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, debug: bool, logger: &mut Logger) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let overrides = InputOverrides {
        tag: args.tag,
        ref_tag: args.ref_tag,
        prefix: args.prefix,
        update_minor: args.update_minor,
        ignore_prerelease: args.ignore_prerelease,
        verbose: args.verbose,
        remote: args.remote,
    };
    let inputs = ActionInputs::resolve(overrides, &config, debug)?;
    *logger =
        Logger::new(inputs.verbose, inputs.debug).with_annotations(config::running_in_actions());

    let repo = Git2Repository::open(&args.repository)
        .with_context(|| format!("Not in a git repository: {}", args.repository.display()))?
        .with_token(args.token);

    let mut outputs = ActionOutputs::from_env();
    run_workflow(&inputs, &repo, logger, &mut outputs)?;

    Ok(())
}

/// Console logging for CI: RUST_LOG when set, otherwise info (debug in step
/// debug mode). The runner timestamps lines itself. On an Actions runner the
/// level is dropped so workflow commands start their line.
fn init_tracing(debug: bool, annotations: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_level(!annotations)
                .with_ansi(!annotations)
                .with_filter(filter),
        )
        .init();
}
