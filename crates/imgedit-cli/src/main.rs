//! imgedit command-line client
//!
//! - `run`: upload one file, apply a pipeline of operations, print history
//! - `repl`: interactive session against the service
//! - `ops`: list the operations the service offers

mod command;
mod render;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use command::{ReplCommand, OPERATIONS};
use imgedit_client::{HttpImageService, ImageUpload, Operation, ServiceConfig};
use imgedit_session::EditSession;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type Session = EditSession<HttpImageService>;

fn cli() -> Command {
    Command::new("imgedit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Edit images through a remote processing service")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .value_name("URL")
                .help("Service base URL (overrides the config file)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with service settings"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Per-request timeout in seconds"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("run")
                .about("Upload a file and apply operations in order")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Image to upload"),
                )
                .arg(
                    Arg::new("op")
                        .long("op")
                        .action(ArgAction::Append)
                        .help("Operation spec, e.g. invert, flip:vertical, rotate:90, resize:640x480"),
                )
                .arg(
                    Arg::new("revert-to")
                        .long("revert-to")
                        .value_parser(value_parser!(usize))
                        .help("Revert to this step after applying all operations"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the history as JSON"),
                ),
        )
        .subcommand(
            Command::new("repl").about("Interactive editing session").arg(
                Arg::new("file")
                    .long("file")
                    .short('f')
                    .value_parser(value_parser!(PathBuf))
                    .help("Image to upload on start"),
            ),
        )
        .subcommand(Command::new("ops").about("List supported operations"))
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let result = match matches.subcommand() {
        Some(("run", args)) => run(&matches, args).await,
        Some(("repl", args)) => repl(&matches, args).await,
        Some(("ops", _)) => {
            print_ops();
            Ok(())
        }
        _ => cli().print_help().map_err(Into::into),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn service_config(matches: &ArgMatches) -> Result<ServiceConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if let Some(url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(url);
    }
    if let Some(&secs) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}

fn connect(matches: &ArgMatches) -> Result<Session> {
    let service = HttpImageService::new(service_config(matches)?)
        .context("invalid service configuration")?;
    let config = service.config();
    tracing::info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "connecting");
    Ok(EditSession::new(service))
}

async fn upload(session: &Session, path: &Path) -> Result<()> {
    let file = ImageUpload::from_path(path).await?;
    let step = session.upload(file).await?;
    println!("uploaded {} -> {}", path.display(), step.artifact());
    Ok(())
}

async fn run(matches: &ArgMatches, args: &ArgMatches) -> Result<()> {
    let operations = args
        .get_many::<String>("op")
        .unwrap_or_default()
        .map(|spec| {
            spec.parse::<Operation>()
                .with_context(|| format!("bad operation {spec:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let json = args.get_flag("json");

    let session = connect(matches)?;
    let file = args
        .get_one::<PathBuf>("file")
        .context("--file is required")?;
    let image = ImageUpload::from_path(file).await?;
    session.upload(image).await?;

    for operation in operations {
        let step = session
            .apply(operation)
            .await
            .with_context(|| format!("after {} step(s)", session.steps().len()))?;
        tracing::debug!(index = step.index(), "applied");
    }

    if let Some(&index) = args.get_one::<usize>("revert-to") {
        session.revert(index)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&session.history())?);
    } else {
        print!("{}", render::history_table(&session.steps()));
    }
    Ok(())
}

async fn repl(matches: &ArgMatches, args: &ArgMatches) -> Result<()> {
    let session = connect(matches)?;
    if let Some(path) = args.get_one::<PathBuf>("file") {
        upload(&session, path).await?;
    }

    println!("imgedit {} - type `help` for commands", env!("CARGO_PKG_VERSION"));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match ReplCommand::parse(&line) {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                println!("error: {err}");
                continue;
            }
        };
        if let Err(err) = execute(&session, command).await {
            println!("error: {err:#}");
        }
    }
    Ok(())
}

async fn execute(session: &Session, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Upload(path) => upload(session, &path).await?,
        ReplCommand::Apply(operation) => {
            let step = session.apply(operation).await?;
            println!("{} {} -> {}", step.index(), step.label(), step.artifact());
        }
        ReplCommand::Revert(index) => {
            let step = session.revert(index)?;
            println!("reverted to {} ({})", step.index(), step.artifact());
        }
        ReplCommand::History => print!("{}", render::history_table(&session.steps())),
        ReplCommand::Current => match session.current_artifact() {
            Some(artifact) => println!("{artifact}"),
            None => println!("(no image uploaded)"),
        },
        ReplCommand::Reset => {
            session.reset();
            println!("session reset");
        }
        ReplCommand::Help => println!("{}", command::help_text()),
        ReplCommand::Quit | ReplCommand::Empty => {}
    }
    Ok(())
}

fn print_ops() {
    print!("{}", command::listing(&OPERATIONS));
}
