use async_recursion::async_recursion;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::store::StoreClient;
use crate::store::constants::PAGE_LIMIT;
use crate::store::types::{Container, ContainerObject};
use crate::utils::format_size;
use crate::wrap_err;

pub mod lazy;

use self::lazy::LazyChildren;

/// Issues a single bounded object-listing call; pure request/response.
pub struct PageLister<S> {
    store: S,
}

impl<S: StoreClient> PageLister<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List at most `limit` objects from a container with exactly one
    /// remote call.
    pub async fn list_page(&self, container: &str, limit: usize) -> Result<Vec<ContainerObject>> {
        self.store.list_objects(container, Some(limit)).await
    }
}

/// A browsable tree node. Expandable variants cache their children after
/// the first successful expansion; the tree is never refreshed in place.
#[derive(Debug)]
pub enum Node<S: StoreClient> {
    Account(AccountNode<S>),
    Container(ContainerNode<S>),
    Object(ObjectNode),
    MoreResults(MoreResultsNode),
}

impl<S: StoreClient + Clone> Node<S> {
    pub fn display_text(&self) -> String {
        match self {
            Node::Account(_) => "/".to_string(),
            Node::Container(n) => format!("{}/", n.container.name),
            Node::Object(n) => format!("{} ({})", n.object.name, format_size(n.object.bytes)),
            Node::MoreResults(_) => "(more results)".to_string(),
        }
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self, Node::Account(_) | Node::Container(_))
    }

    /// Compute this node's children once and return the cached slice on
    /// every later call. Leaf nodes expand to an empty slice.
    pub async fn expand_children(&self, cancel: &CancellationToken) -> Result<&[Node<S>]> {
        match self {
            Node::Account(n) => n.expand_children(cancel).await,
            Node::Container(n) => n.expand_children(cancel).await,
            Node::Object(_) | Node::MoreResults(_) => Ok(&[]),
        }
    }
}

/// Root of the browsable tree: fans out one [`ContainerNode`] per container
/// in the account.
#[derive(Debug)]
pub struct AccountNode<S: StoreClient> {
    store: S,
    children: LazyChildren<Node<S>>,
}

impl<S: StoreClient + Clone> AccountNode<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            children: LazyChildren::new(),
        }
    }

    async fn expand_children(&self, cancel: &CancellationToken) -> Result<&[Node<S>]> {
        self.children
            .get_or_expand(cancel, || async {
                let containers =
                    wrap_err!(self.store.list_containers().await, ListContainersFailed)?;
                Ok(containers
                    .into_iter()
                    .map(|c| Node::Container(ContainerNode::new(self.store.clone(), c)))
                    .collect())
            })
            .await
    }
}

/// A container in the tree. Expands to the first page of its objects, plus
/// a [`MoreResultsNode`] sentinel when the page came back exactly full.
#[derive(Debug)]
pub struct ContainerNode<S: StoreClient> {
    store: S,
    container: Container,
    children: LazyChildren<Node<S>>,
}

impl<S: StoreClient + Clone> ContainerNode<S> {
    pub fn new(store: S, container: Container) -> Self {
        Self {
            store,
            container,
            children: LazyChildren::new(),
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    async fn expand_children(&self, cancel: &CancellationToken) -> Result<&[Node<S>]> {
        self.children
            .get_or_expand(cancel, || async {
                let lister = PageLister::new(self.store.clone());
                let page = wrap_err!(
                    lister.list_page(&self.container.name, PAGE_LIMIT).await,
                    ExpandFailed {
                        node: self.container.name.clone()
                    }
                )?;

                // A page that is exactly full is ambiguous between "exactly
                // PAGE_LIMIT objects" and "more to come"; assume more. The
                // false positive on exactly-full containers is deliberate.
                let truncated = page.len() == PAGE_LIMIT;
                let mut nodes: Vec<Node<S>> = page
                    .into_iter()
                    .map(|object| Node::Object(ObjectNode { object }))
                    .collect();
                if truncated {
                    nodes.push(Node::MoreResults(MoreResultsNode));
                }
                Ok(nodes)
            })
            .await
    }
}

/// Leaf node for a single object.
#[derive(Debug)]
pub struct ObjectNode {
    pub object: ContainerObject,
}

/// Sentinel appended when a container's first page is exactly full;
/// paging past the first page is unsupported in the tree view.
#[derive(Debug)]
pub struct MoreResultsNode;

/// Render a node and its lazily-expanded descendants as indented text.
#[async_recursion]
pub async fn render_tree<S>(node: &Node<S>, depth: usize, cancel: &CancellationToken) -> Result<()>
where
    S: StoreClient + Clone + Send + Sync,
{
    let indent = "  ".repeat(depth);
    println!("{indent}{}", node.display_text());

    if node.is_expandable() {
        for child in node.expand_children(cancel).await? {
            render_tree(child, depth + 1, cancel).await?;
        }
    }
    Ok(())
}
