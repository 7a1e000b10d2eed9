use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::error::{NotFoundSnafu, Result};
use crate::purge::BulkDeleteCoordinator;
use crate::purge::progress::ConsoleProgressSink;
use crate::store::types::Container;
use crate::store::{OpenDalStore, StoreClient};
use crate::tree::{AccountNode, ContainerNode, Node, render_tree};
use crate::utils::{Confirmation, confirm_purge, format_size};
use crate::wrap_err;

#[derive(Parser)]
#[command(
    name = "purgify",
    version,
    about = "Browse object storage containers and bulk-delete them with progress"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the containers in the account
    Containers,
    /// Render the lazily-expanded container tree
    Tree {
        /// Limit the tree to a single container
        container: Option<String>,
    },
    /// Show the read-only properties of a container
    Stat { container: String },
    /// Delete a container and all of its contents
    Purge {
        container: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        force: bool,
    },
}

pub async fn run(args: Args, store: OpenDalStore) -> Result<()> {
    match args.command {
        Command::Containers => containers(&store).await,
        Command::Tree { container } => tree(&store, container.as_deref()).await,
        Command::Stat { container } => stat(&store, &container).await,
        Command::Purge { container, force } => purge(&store, &container, force).await,
    }
}

async fn containers(store: &OpenDalStore) -> Result<()> {
    let containers = wrap_err!(store.list_containers().await, ListContainersFailed)?;
    for container in containers {
        println!(
            "{:<32} {:>10} {:>8} objects",
            container.name,
            format_size(container.bytes),
            container.count
        );
    }
    Ok(())
}

async fn tree(store: &OpenDalStore, container: Option<&str>) -> Result<()> {
    let cancel = CancellationToken::new();
    let root = match container {
        Some(name) => {
            let container = find_container(store, name).await?;
            Node::Container(ContainerNode::new(store.clone(), container))
        }
        None => Node::Account(AccountNode::new(store.clone())),
    };
    render_tree(&root, 0, &cancel).await
}

async fn stat(store: &OpenDalStore, name: &str) -> Result<()> {
    let container = wrap_err!(
        find_container(store, name).await,
        StatFailed {
            container: name.to_string()
        }
    )?;
    println!("Name:         {}", container.name);
    println!("Size:         {}", format_size(container.bytes));
    println!("Object count: {}", container.count);
    Ok(())
}

async fn purge(store: &OpenDalStore, name: &str, force: bool) -> Result<()> {
    let container = find_container(store, name).await?;

    match confirm_purge(name, force)? {
        Confirmation::Yes => {}
        Confirmation::No | Confirmation::Cancel => {
            println!("Aborted.");
            return Ok(());
        }
    }

    // ctrl-c requests cooperative cancellation of the delete loop
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let coordinator = BulkDeleteCoordinator::new(store.clone());
    let progress = ConsoleProgressSink::new(format!("Deleting {name}"));
    wrap_err!(
        coordinator.delete_all(&container, &progress, &cancel).await,
        PurgeFailed {
            container: name.to_string()
        }
    )?;

    println!();
    println!("Deleted container: {name}");
    Ok(())
}

async fn find_container(store: &OpenDalStore, name: &str) -> Result<Container> {
    let containers = store.list_containers().await?;
    match containers.into_iter().find(|c| c.name == name) {
        Some(container) => Ok(container),
        None => NotFoundSnafu { path: name }.fail(),
    }
}
