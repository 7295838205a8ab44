// tests/ancestor_chain.rs
//! Locating nodes under a root: upward walk plus downward confirmation.

mod common;

use common::*;
use notion_docview::model::{Block, BlockCommon, MarkerBlock, Parent};
use notion_docview::types::BlockId;
use notion_docview::{ChainResolver, HierarchyCache, HierarchyNode, HierarchyProvider};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Root page 1 > page 2 > database 3 > row 4.
fn workspace() -> Arc<FixtureRepository> {
    let repo = FixtureRepository::new();
    repo.add_page(page(1, "Home", Parent::Workspace));
    repo.add_page(page(2, "Projects", under_page(1)));
    repo.add_database(database(3, "Tasks", under_page(2), true));
    repo.add_page(row(4, "Ship it", 3));
    repo.set_children(1, vec![child_page(2, "Projects", 1)]);
    repo.set_children(2, vec![child_database(3, "Tasks", 2)]);
    repo.set_rows(3, vec![row(4, "Ship it", 3)]);
    Arc::new(repo)
}

fn provider(repo: &Arc<FixtureRepository>, root: u32) -> HierarchyProvider {
    let cache = Arc::new(HierarchyCache::in_memory(repo.clone()));
    let resolver = Arc::new(ChainResolver::new(repo.clone()));
    HierarchyProvider::new(cache, resolver, id(root))
}

fn chain_titles(chain: &[HierarchyNode]) -> Vec<&str> {
    chain.iter().map(|n| n.title.as_str()).collect()
}

#[tokio::test]
async fn test_locate_row_inside_nested_database() {
    let repo = workspace();
    let chain = provider(&repo, 1).locate(&id(4)).await.unwrap().unwrap();

    assert_eq!(
        chain_titles(&chain),
        vec!["Home", "Projects", "Tasks", "Ship it"]
    );
}

#[tokio::test]
async fn test_locate_root_is_root_alone() {
    let repo = workspace();
    let chain = provider(&repo, 1).locate(&id(1)).await.unwrap().unwrap();

    assert_eq!(chain_titles(&chain), vec!["Home"]);
}

#[tokio::test]
async fn test_page_outside_root_is_not_located() {
    let repo = workspace();
    repo.add_page(page(9, "Elsewhere", Parent::Workspace));

    assert!(provider(&repo, 1).locate(&id(9)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_id_is_not_located() {
    let repo = workspace();

    assert!(provider(&repo, 1).locate(&id(404)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_parent_cycle_ends_the_walk() {
    let repo = workspace();
    repo.add_page(page(20, "Ping", under_page(21)));
    repo.add_page(page(21, "Pong", under_page(20)));

    assert!(provider(&repo, 1).locate(&id(20)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_parent_that_does_not_list_the_child_hides_it() {
    let repo = workspace();
    // Claims page 2 as parent, but page 2's blocks never mention it.
    repo.add_page(page(5, "Orphan", under_page(2)));
    let provider = provider(&repo, 1);

    assert!(provider.locate(&id(5)).await.unwrap().is_none());
    assert!(provider.ensure_visible(&id(5)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ensure_visible_returns_listed_node() {
    let repo = workspace();
    let node = provider(&repo, 1)
        .ensure_visible(&id(4))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(node.id, id(4));
    assert_eq!(node.title, "Ship it");
}

#[tokio::test]
async fn test_get_parent_stops_at_root() {
    let repo = workspace();
    let provider = provider(&repo, 1);
    let root = provider.root_node().await.unwrap();
    let children = provider.get_children(None).await.unwrap();

    let parent = provider.get_parent(&children[0]).await.unwrap().unwrap();

    assert_eq!(parent, root);
    assert!(provider.get_parent(&root).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unreachable_root_is_an_error() {
    let repo = workspace();

    assert!(provider(&repo, 404).root_node().await.is_err());
}

#[tokio::test]
async fn test_block_parents_are_climbed_to_the_enclosing_page() {
    let repo = workspace();
    // Page 6 sits in a column, inside a column list, inside page 1.
    let column_list = BlockId::new(hex(31));
    let column = BlockId::new(hex(32));
    repo.add_block(child_page(1, "Home", 0));
    repo.add_block(Block::ColumnList(MarkerBlock {
        common: BlockCommon::new(column_list.clone()).with_parent(BlockId::new(hex(1))),
    }));
    repo.add_block(Block::Column(MarkerBlock {
        common: BlockCommon::new(column.clone()).with_parent(column_list),
    }));
    let mut nested = page(6, "In a column", Parent::Workspace);
    nested.parent = Some(Parent::Block(column));
    repo.add_page(nested);

    let resolver = ChainResolver::new(repo.clone());
    let chain = resolver.resolve_chain(&id(6), &id(1)).await.unwrap().unwrap();

    assert_eq!(chain_titles(&chain), vec!["Home", "In a column"]);
}

#[tokio::test]
async fn test_listing_feeds_the_item_cache() {
    let repo = workspace();
    let provider = provider(&repo, 1);
    provider.get_children(None).await.unwrap();
    let before = repo.calls("retrieve_page");

    let parent = provider
        .get_parent(&HierarchyNode::page(id(2), "Projects"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(parent.id, id(1));
    assert_eq!(repo.calls("retrieve_page"), before);
}

#[tokio::test]
async fn test_refresh_item_forgets_children() {
    let repo = workspace();
    let provider = provider(&repo, 1);
    provider.get_children(None).await.unwrap();

    provider.refresh_item(&id(1)).await;
    provider.get_children(None).await.unwrap();

    assert_eq!(repo.calls("retrieve_children"), 2);
}

#[tokio::test]
async fn test_missing_credentials_are_reported() {
    let repo = Arc::new(FixtureRepository::unconfigured());
    let cache = Arc::new(HierarchyCache::in_memory(repo.clone()));
    let resolver = Arc::new(ChainResolver::new(repo.clone()));
    let provider = HierarchyProvider::new(cache, resolver, id(1));

    let err = provider.locate(&id(2)).await.unwrap_err();
    assert!(err.is_not_configured());
}
