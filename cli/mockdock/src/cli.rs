use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mockdock",
    version,
    about = "A mock Docker CLI that records images and containers in local JSON files"
)]
pub struct Cli {
    /// Storage directory (default: $MOCKDOCK_ROOT or ./mock-docker)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pull an image from a registry
    Pull(PullArgs),
    /// Push an image to a registry
    Push(PushArgs),
    /// Build an image from a Dockerfile
    Build(BuildArgs),
    /// Run a command in a new container
    Run(RunArgs),
    /// Start one or more stopped containers
    Start(ContainerArgs),
    /// Stop one or more running containers
    Stop(ContainerArgs),
    /// Remove one or more containers
    Rm(ContainerArgs),
    /// Remove one or more images
    Rmi(RmiArgs),
    /// List containers
    Ps(ListArgs),
    /// List images
    Images(ListArgs),
    /// Create a tag TARGET_IMAGE that refers to SOURCE_IMAGE
    Tag(TagArgs),
    /// Remove stopped containers and unused images
    Prune,
    /// Log in to a registry
    Login(LoginArgs),
    /// Execute a command in a running container
    Exec(ExecArgs),
}

#[derive(Args, Debug)]
pub struct PullArgs {
    /// NAME[:TAG]
    pub image: String,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// NAME[:TAG]
    pub image: String,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Name and optionally a tag in the format 'name:tag'
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Accepted for compatibility; there is no cache
    #[arg(long)]
    pub no_cache: bool,

    /// Record missing base images as pulled before building
    #[arg(long)]
    pub pull: bool,

    /// Build context directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run container in background
    #[arg(short, long)]
    pub detach: bool,

    /// Assign a name to the container
    #[arg(long)]
    pub name: Option<String>,

    /// Publish a container's port(s) to the host
    #[arg(short, long = "publish")]
    pub publish: Vec<String>,

    /// Set environment variables
    #[arg(short, long)]
    pub env: Vec<String>,

    pub image: String,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ContainerArgs {
    /// Container IDs or names
    #[arg(required = true)]
    pub containers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RmiArgs {
    /// Image IDs, names or NAME:TAG references
    #[arg(required = true)]
    pub images: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only display IDs
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct TagArgs {
    /// SOURCE_IMAGE[:TAG]
    pub source: String,
    /// TARGET_IMAGE[:TAG]
    pub target: String,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long)]
    pub password: Option<String>,

    /// Registry server (default: Docker Hub)
    pub server: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExecArgs {
    pub container: String,

    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_keeps_trailing_command_verbatim() {
        let cli = Cli::try_parse_from([
            "mockdock", "run", "-d", "--name", "web", "-p", "8080:80", "nginx", "sh", "-c", "echo hi",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.detach);
        assert_eq!(args.name.as_deref(), Some("web"));
        assert_eq!(args.publish, vec!["8080:80"]);
        assert_eq!(args.image, "nginx");
        assert_eq!(args.command, vec!["sh", "-c", "echo hi"]);
    }

    #[test]
    fn global_root_after_subcommand() {
        let cli = Cli::try_parse_from(["mockdock", "ps", "--root", "/tmp/x", "-vv"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn exec_needs_a_command() {
        assert!(Cli::try_parse_from(["mockdock", "exec", "web"]).is_err());
        assert!(Cli::try_parse_from(["mockdock", "stop"]).is_err());
    }

    #[test]
    fn build_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["mockdock", "build", "-t", "app:1"]).unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.tag.as_deref(), Some("app:1"));
    }
}
