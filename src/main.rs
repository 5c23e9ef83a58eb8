use bitlet::areas::repository::Repository;
use bitlet::artifacts::core::{PagerWriter, should_page};
use bitlet::artifacts::merge::MergeOutcome;
use bitlet::commands::porcelain::checkout::CheckoutTarget;
use bitlet::errors::BitletError;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;

/// The command ran, but reported a user error or ended in a conflicted merge
const EXIT_USER_ERROR: u8 = 1;
/// The command had nothing to do
const EXIT_NOTHING_TO_DO: u8 = 2;
/// Corrupt repository, I/O failure or any other unexpected error
const EXIT_INTERNAL_ERROR: u8 = 3;

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    about = "A tiny version-control system",
    long_about = "Bitlet tracks snapshots of a flat working directory: blobs, commits and \
    branches stored under .bitlet, with staging, checkout, reset and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates .bitlet in the current directory or at the specified \
        path, with an initial commit on the master branch."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files on top of the HEAD commit and \
        moves the current branch to the new commit."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage a tracked file for removal and delete it"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the first-parent history of HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit reachable from a branch")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch, checkout -- <file> restores a file \
        from HEAD and checkout <commit> -- <file> restores it from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the HEAD commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    fn pages_output(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli.command).await {
        Ok(code) => ExitCode::from(code),
        Err(error) => report(error),
    }
}

async fn run(command: Commands) -> anyhow::Result<u8> {
    let pager = (command.pages_output() && should_page()).then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let pwd = std::env::current_dir()?;
    let mut repository = match &command {
        Commands::Init { path: Some(path) } => Repository::new(path, writer)?,
        _ => Repository::new(&pwd.to_string_lossy(), writer)?,
    };

    if !matches!(command, Commands::Init { .. }) {
        repository.ensure_initialized()?;
    }

    let mut exit_code = 0;

    match command {
        Commands::Init { .. } => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => {
            repository.commit(&message).await?;
        }
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(&message)?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { target, file } => {
            let target = match (target, file) {
                (None, Some(path)) => CheckoutTarget::File { path },
                (Some(commit), Some(path)) => CheckoutTarget::CommitFile { commit, path },
                (Some(name), None) => CheckoutTarget::Branch { name },
                (None, None) => Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "checkout needs a branch, or -- followed by a file",
                    )
                    .exit(),
            };
            repository.checkout(target).await?
        }
        Commands::Branch { name } => repository.branch(&name)?,
        Commands::RmBranch { name } => repository.rm_branch(&name)?,
        Commands::Reset { commit } => repository.reset(&commit).await?,
        Commands::Merge { branch } => {
            if let MergeOutcome::Conflicted(_) = repository.merge(&branch).await? {
                exit_code = EXIT_USER_ERROR;
            }
        }
    }

    repository.writer().flush()?;
    drop(repository);

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(exit_code)
}

fn report(error: anyhow::Error) -> ExitCode {
    match error.downcast_ref::<BitletError>() {
        Some(error) if error.is_nothing_to_do() => {
            eprintln!("{}", error);
            ExitCode::from(EXIT_NOTHING_TO_DO)
        }
        Some(error) => {
            eprintln!("{}", error);
            ExitCode::from(EXIT_USER_ERROR)
        }
        None => {
            eprintln!("fatal: {:#}", error);
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}
