//! Drains a paginated tool listing into one ordered catalog.

use crate::constants::DEFAULT_MAX_CATALOG_PAGES;
use crate::mcp::{GatewayMcpClient, McpError, ToolDescriptor, ToolPage};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// Anything that can serve one page of a tool listing.
#[async_trait]
pub trait ToolPager: Send + Sync {
    async fn list_tools_page(&self, pagination_token: Option<&str>) -> Result<ToolPage, McpError>;
}

#[async_trait]
impl ToolPager for GatewayMcpClient {
    async fn list_tools_page(&self, pagination_token: Option<&str>) -> Result<ToolPage, McpError> {
        GatewayMcpClient::list_tools_page(self, pagination_token).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLimits {
    pub max_pages: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_CATALOG_PAGES,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Mcp(#[from] McpError),
    #[error("tool listing still had more pages after {max_pages} requests ({collected} tools so far)")]
    PageLimitExceeded { max_pages: usize, collected: usize },
}

/// Fetch every page, appending tools in the order the pages arrive.
///
/// An absent or empty token ends the listing. No deduplication is applied.
pub async fn list_all_tools<P>(
    pager: &P,
    limits: CatalogLimits,
) -> Result<Vec<ToolDescriptor>, CatalogError>
where
    P: ToolPager + ?Sized,
{
    let mut tools = Vec::new();
    let mut pagination_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if pages >= limits.max_pages {
            warn!(
                max_pages = limits.max_pages,
                collected = tools.len(),
                "Tool listing exceeded page limit"
            );
            return Err(CatalogError::PageLimitExceeded {
                max_pages: limits.max_pages,
                collected: tools.len(),
            });
        }

        let page = pager.list_tools_page(pagination_token.as_deref()).await?;
        pages += 1;
        debug!(page = pages, tools = page.tools.len(), "Received tool page");
        tools.extend(page.tools);

        match page.pagination_token.filter(|token| !token.is_empty()) {
            Some(next) => pagination_token = Some(next),
            None => break,
        }
    }

    Ok(tools)
}
