mod report;

use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use mimalloc::MiMalloc;
use report::{Change, Renderer};
use sapling_diff::find_changes;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
enum Options {
    /// Diffs NEW against the tree of OLD.
    Diff {
        old: Utf8PathBuf,
        new: Utf8PathBuf,
        /// Also print the tree derived for NEW.
        #[arg(long)]
        tree: bool,
    },
    /// Prints the tree of a file.
    Dump { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    match Options::parse() {
        Options::Diff { old, new, tree } => {
            let old_tree = sapling_text::parse(&read(&old)?)
                .with_context(|| format!("failed to build a tree for `{old}`"))?;
            let text = read(&new)?;

            let result = find_changes(Some(&old_tree), &text);
            tracing::info!(has_changes = result.has_changes, "diffed `{new}` against `{old}`");

            let renderer = Renderer::styled();
            for change in Change::all(&result) {
                eprintln!("{}", change.render(&renderer, new.as_str(), &text));
            }

            if tree {
                print!("{:?}", result.new_tree);
            }
            println!("{}", report::summary(&result));

            Ok(())
        }
        Options::Dump { path } => {
            let tree = sapling_text::parse(&read(&path)?)
                .with_context(|| format!("failed to build a tree for `{path}`"))?;
            print!("{tree:?}");

            Ok(())
        }
    }
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SAPLING_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
