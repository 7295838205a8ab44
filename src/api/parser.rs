// src/api/parser.rs
//! Response parsing: splits success bodies from error bodies and converts
//! wire shapes into the domain model.

use super::client::ApiResponse;
use super::responses::{NotionError, ToDomain, WireBlock, WireDatabase, WireList, WirePage};
use super::types::PaginatedResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Database, Page};
use reqwest::StatusCode;

/// Parse any Notion API response body into `T`, or into the API error it carries.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Builds the error for a non-2xx response, preferring the API's own error body.
pub(crate) fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status: status.as_u16(),
        };
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status: status.as_u16(),
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let page: WirePage = parse_api_response(result)?;
    page.to_domain()
}

pub fn parse_database_response(result: ApiResponse<String>) -> Result<Database, AppError> {
    let database: WireDatabase = parse_api_response(result)?;
    database.to_domain()
}

pub fn parse_block_response(result: ApiResponse<String>) -> Result<Block, AppError> {
    let block: WireBlock = parse_api_response(result)?;
    block.to_domain()
}

/// Parse one page of `blocks/{id}/children`.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let list: WireList<WireBlock> = parse_api_response(result)?;
    Ok(PaginatedResponse {
        results: list.results.to_domain()?,
        next_cursor: list.next_cursor,
        has_more: list.has_more,
    })
}

/// Parse one page of `databases/{id}/query`.
pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    let list: WireList<WirePage> = parse_api_response(result)?;
    Ok(PaginatedResponse {
        results: list.results.to_domain()?,
        next_cursor: list.next_cursor,
        has_more: list.has_more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            url: "https://api.notion.com/v1/test".to_string(),
        }
    }

    #[test]
    fn test_error_body_is_classified() {
        let err = parse_page_response(response(
            404,
            r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page"}"#,
        ))
        .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Could not find page"));
    }

    #[test]
    fn test_unparseable_error_falls_back_to_status() {
        let err = parse_page_response(response(502, "<html>bad gateway</html>")).unwrap_err();
        match err {
            AppError::NotionService { code, status, .. } => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502));
                assert_eq!(status, 502);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_blocks_pagination_keeps_cursor() {
        let page = parse_blocks_pagination(response(
            200,
            r#"{"object":"list","results":[
                {"id":"b1","type":"divider","divider":{}},
                {"id":"b2","type":"paragraph","paragraph":{"rich_text":[]}}
            ],"next_cursor":"abc","has_more":true}"#,
        ))
        .unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert!(page.has_more);
    }

    #[test]
    fn test_rows_pagination_without_results_is_empty() {
        let page = parse_pages_pagination(response(
            200,
            r#"{"object":"list","next_cursor":null,"has_more":false}"#,
        ))
        .unwrap();
        assert!(page.results.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_malformed_success_body() {
        let err = parse_database_response(response(200, "not json")).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
