use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use gitlet::commands::porcelain::checkout::CheckoutOutcome;
use gitlet::{Error, Missing, Repository};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod render;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "Gitlet tracks snapshots of a working directory, organizes them into \
    branches and restores any of them on demand. Everything is stored locally in `.gitlet`.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        long = "dir",
        global = true,
        help = "Run as if gitlet was started in this directory"
    )]
    dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a new repository in the working directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stop tracking it and delete it from the working directory"
    )]
    Rm {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
        #[arg(index = 1, conflicts_with = "message", help = "The commit message")]
        text: Option<String>,
    },
    #[command(name = "status", about = "Show branches and staged changes")]
    Status,
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create a branch at the current commit, or list branches"
    )]
    Branch {
        #[arg(index = 1)]
        name: Option<String>,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "`checkout <branch>` switches to a branch. \
        `checkout -- <file>` restores a file from the current commit and \
        `checkout <commit> -- <file>` restores it from the given commit."
    )]
    Checkout {
        #[arg(index = 1)]
        target: Option<String>,
        #[arg(index = 2, last = true)]
        file: Option<PathBuf>,
    },
    #[command(
        name = "reset",
        about = "Move the current branch and the working directory to a commit"
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("GITLET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let repository = Repository::new(&dir)?;
    let mut stdout = std::io::stdout().lock();

    match run(&cli.command, &repository, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            let message = match error.downcast_ref::<Error>() {
                Some(error) => render::error(error),
                None => format!("{error:#}"),
            };

            stdout.flush()?;
            eprintln!("{} {message}", "error:".red().bold());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(command: &Commands, repository: &Repository, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Init => {
            repository.init()?;
            writeln!(
                out,
                "Initialized empty Gitlet repository in {}",
                repository.metadata_path().display()
            )?;
        }
        Commands::Add { file } => {
            repository.add(file)?;
        }
        Commands::Rm { file } => repository.remove(file)?,
        Commands::Commit { message, text } => {
            let message = message.as_deref().or(text.as_deref()).unwrap_or_default();
            repository.commit(message)?;
        }
        Commands::Status => render::status(out, &repository.status()?)?,
        Commands::Log => render::log(out, &repository.log()?)?,
        Commands::GlobalLog => render::log(out, &repository.global_log()?)?,
        Commands::Find { message } => {
            let found = repository.find(message)?;
            if found.is_empty() {
                writeln!(out, "Found no commit with that message.")?;
            }
            for oid in found {
                writeln!(out, "{oid}")?;
            }
        }
        Commands::Branch { name: Some(name) } => repository.branch(name)?,
        Commands::Branch { name: None } => render::branches(out, &repository.branches()?)?,
        Commands::RmBranch { name } => repository.delete_branch(name)?,
        Commands::Checkout { target, file } => checkout(repository, target, file, out)?,
        Commands::Reset { commit } => {
            repository.reset(commit)?;
        }
    }

    Ok(())
}

fn checkout(
    repository: &Repository,
    target: &Option<String>,
    file: &Option<PathBuf>,
    out: &mut impl Write,
) -> Result<()> {
    match (target, file) {
        (commit_ref, Some(file)) => repository.checkout_file(commit_ref.as_deref(), file)?,
        (Some(name), None) => match repository.checkout_branch(name) {
            Ok(CheckoutOutcome::AlreadyOnBranch) => {
                writeln!(out, "No need to checkout the current branch.")?
            }
            Ok(CheckoutOutcome::Switched { .. }) => {}
            // a bare name that is not a branch may still be a file of the current commit
            Err(Error::NotFound(Missing::Branch(_))) => {
                match repository.checkout_file(None, Path::new(name)) {
                    Err(Error::NotFound(Missing::FileInCommit { .. })) => {
                        anyhow::bail!(render::NoSuchBranchOrFile)
                    }
                    result => result?,
                }
            }
            Err(error) => return Err(error.into()),
        },
        (None, None) => anyhow::bail!(render::IncorrectOperands),
    }

    Ok(())
}
