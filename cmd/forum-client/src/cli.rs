use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-line client for the discussion forum", long_about = None)]
pub struct Cli {
    /// Overrides `api.base_url` from the settings.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and remember the session.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List threads, optionally filtered by category.
    Threads {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a thread with its comments.
    Thread { thread_id: String },
    /// Start a new thread.
    Post(PostArgs),
    /// Comment on a thread.
    Comment { thread_id: String, content: String },
    /// Vote on a thread or a comment.
    Vote {
        #[command(subcommand)]
        target: VoteCommand,
    },
    /// Show the leaderboard.
    Leaderboard,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "FORUM_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "FORUM_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub body: String,
    /// Left empty, the server files the thread under its default category.
    #[arg(long, default_value = "")]
    pub category: String,
}

#[derive(Subcommand, Debug)]
pub enum VoteCommand {
    Thread {
        thread_id: String,
        direction: Direction,
    },
    Comment {
        thread_id: String,
        comment_id: String,
        direction: Direction,
    },
}

/// `up` and `down` toggle: repeating one withdraws the vote.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Neutral,
}
