use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for freelook")]
struct Cli {
    /// Tasks to run, in order. `check` expands to every task.
    #[arg(value_enum, required = true)]
    tasks: Vec<Task>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Task {
    /// fmt, clippy, test, doc and smoke, in that order
    Check,
    /// cargo fmt --check
    Fmt,
    /// clippy with warnings denied
    Clippy,
    /// all workspace tests
    Test,
    /// rustdoc for the workspace
    Doc,
    /// short headless run of the frame loop through freelook-cli
    Smoke,
}

impl Task {
    const CHECK: [Task; 5] = [Task::Fmt, Task::Clippy, Task::Test, Task::Doc, Task::Smoke];

    fn expand(self) -> Vec<Task> {
        match self {
            Task::Check => Self::CHECK.to_vec(),
            task => vec![task],
        }
    }

    fn cargo_args(self) -> &'static [&'static str] {
        match self {
            Task::Check => &[],
            Task::Fmt => &["fmt", "--all", "--", "--check"],
            Task::Clippy => &[
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ],
            Task::Test => &["test", "--workspace"],
            Task::Doc => &["doc", "--workspace", "--no-deps"],
            Task::Smoke => &[
                "run",
                "-p",
                "freelook-cli",
                "--",
                "simulate",
                "--frames",
                "120",
                "--script",
                "w*30,m40/0,wd*20,e*10,x",
            ],
        }
    }
}

fn run(task: Task) -> Result<()> {
    let args = task.cargo_args();
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{task:?} failed ({status})");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    for task in cli.tasks.into_iter().flat_map(Task::expand) {
        run(task)?;
    }
    Ok(())
}
