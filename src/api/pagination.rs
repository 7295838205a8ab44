// src/api/pagination.rs
//! Cursor-driven pagination over Notion list endpoints.

use super::types::{PaginatedResponse, PaginationResult};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// Fetches every page of a listing, feeding each `next_cursor` back into the
/// next request.
pub async fn fetch_all_pages<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(NOTION_API_PAGE_SIZE as u32, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_follows_cursor_until_exhausted() {
        let mut seen_cursors = Vec::new();
        let result = fetch_all_pages(
            |_, cursor: Option<String>| {
                seen_cursors.push(cursor.clone());
                let next = match cursor.as_deref() {
                    None => Some("c1".to_string()),
                    Some("c1") => Some("c2".to_string()),
                    _ => None,
                };
                async move {
                    Ok(PaginatedResponse {
                        results: vec![next.clone().unwrap_or_else(|| "last".into())],
                        has_more: next.is_some(),
                        next_cursor: next,
                    })
                }
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.items, vec!["c1", "c2", "last"]);
        assert_eq!(result.total_fetched, 3);
        assert_eq!(
            seen_cursors,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_respects_page_limit() {
        let result = fetch_all_pages(
            |_, _| async {
                Ok(PaginatedResponse {
                    results: vec![1],
                    next_cursor: Some("again".to_string()),
                    has_more: true,
                })
            },
            Some(2),
        )
        .await
        .unwrap();
        assert_eq!(result.items, vec![1, 1]);
    }
}
