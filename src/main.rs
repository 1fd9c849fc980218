use clap::{Parser, Subcommand};
use kube_xray::config::Config;
use kube_xray::matcher::Matcher;
use kube_xray::xray::{self, Tree};
use kube_xray::{Result, diagnostics, render, snapshot};

use anyhow::Context;

#[derive(Parser)]
#[command(name = "kube-xray")]
#[command(about = "Resource relationship trees", long_about = None)]
struct Cli {
    /// Optional config.json with display and filter settings.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a snapshot as a sorted tree, optionally filtered.
    Show {
        #[arg(long)]
        tree: String,

        /// Keep only branches whose leaf lineage matches.
        #[arg(short = 'q', long)]
        query: Option<String>,

        #[arg(long, value_enum)]
        matcher: Option<Matcher>,

        #[arg(long)]
        icons: bool,
    },
    /// Print the leaf lineages of a snapshot as JSON.
    Flatten {
        #[arg(long)]
        tree: String,
    },
    /// Rebuild a tree from a JSON array of leaf lineages and render it.
    Hydrate {
        #[arg(long)]
        specs: String,
    },
    /// Report whether two snapshots differ once sorted.
    Diff {
        #[arg(long)]
        old: String,

        #[arg(long)]
        new: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut cfg = Config::load_or_default(cli.config.as_deref())?;

    match cli.cmd {
        Commands::Show {
            tree,
            query,
            matcher,
            icons,
        } => {
            if let Some(m) = matcher {
                cfg.matcher = m;
            }
            cfg.show_icons |= icons;

            // Publish through the displayed slot so show and a live refresh
            // share the same sort, diff and filter path.
            let displayed = xray::Displayed::new();
            displayed.publish(snapshot::load_snapshot(&tree)?);
            if let Some(q) = query {
                displayed.set_query(q);
            }

            let matcher = cfg.matcher;
            match displayed
                .view(|q, hay| matcher.matches(q, hay))
                .with_context(|| diagnostics::error_message("filter failed"))?
            {
                Some(view) => print!("{}", render::render_tree(&view, &cfg)),
                None => println!("No matches"),
            }
        }
        Commands::Flatten { tree } => {
            let tree = snapshot::load_snapshot(&tree)?;
            let specs: Vec<xray::NodeSpec> = tree.flatten(tree.root()).collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
        Commands::Hydrate { specs } => {
            let specs = snapshot::load_specs(&specs)?;
            let mut tree = xray::hydrate(&specs)
                .with_context(|| diagnostics::error_message("hydrate failed"))?;
            tree.sort();
            tree.dump();
            print!("{}", render::render_tree(&tree, &cfg));
        }
        Commands::Diff { old, new } => {
            let old = sorted(snapshot::load_snapshot(&old)?);
            let new = sorted(snapshot::load_snapshot(&new)?);
            if xray::diff(Some(&old), Some(&new)) {
                println!("changed");
            } else {
                println!("unchanged");
            }
        }
    }

    Ok(())
}

fn sorted(mut tree: Tree) -> Tree {
    tree.sort();
    tree
}
