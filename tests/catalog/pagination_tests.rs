// Tool catalog accumulation tests
//
// Drives `list_all_tools` with a scripted pager and checks append order,
// termination and the page limit.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use toolgate_core::{
    CatalogError, CatalogLimits, McpError, ToolDescriptor, ToolPage, ToolPager, list_all_tools,
};

#[derive(Clone, Default)]
struct ScriptedPager {
    pages: Arc<Mutex<Vec<ToolPage>>>,
    tokens_seen: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedPager {
    fn new(pages: Vec<ToolPage>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages)),
            tokens_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn calls(&self) -> Vec<Option<String>> {
        self.tokens_seen.lock().await.clone()
    }
}

#[async_trait]
impl ToolPager for ScriptedPager {
    async fn list_tools_page(&self, pagination_token: Option<&str>) -> Result<ToolPage, McpError> {
        self.tokens_seen
            .lock()
            .await
            .push(pagination_token.map(str::to_string));
        let mut pages = self.pages.lock().await;
        if pages.is_empty() {
            return Err(McpError::EmptyResponse);
        }
        Ok(pages.remove(0))
    }
}

fn page(prefix: &str, count: usize, token: Option<&str>) -> ToolPage {
    ToolPage {
        tools: (0..count)
            .map(|index| ToolDescriptor::new(format!("{prefix}{index}")))
            .collect(),
        pagination_token: token.map(str::to_string),
    }
}

#[tokio::test]
async fn three_pages_concatenate_in_call_order() {
    let pager = ScriptedPager::new(vec![
        page("a", 2, Some("A")),
        page("b", 3, Some("B")),
        page("c", 1, None),
    ]);

    let tools = list_all_tools(&pager, CatalogLimits::default())
        .await
        .expect("catalog");

    let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_str()).collect();
    assert_eq!(names, vec!["a0", "a1", "b0", "b1", "b2", "c0"]);
    assert_eq!(
        pager.calls().await,
        vec![None, Some("A".to_string()), Some("B".to_string())]
    );
}

#[tokio::test]
async fn single_page_without_token_is_one_call() {
    let pager = ScriptedPager::new(vec![page("only", 4, None)]);
    let tools = list_all_tools(&pager, CatalogLimits::default())
        .await
        .expect("catalog");
    assert_eq!(tools.len(), 4);
    assert_eq!(pager.calls().await.len(), 1);
}

#[tokio::test]
async fn duplicate_names_are_kept() {
    let pager = ScriptedPager::new(vec![page("t", 1, Some("next")), page("t", 1, None)]);
    let tools = list_all_tools(&pager, CatalogLimits::default())
        .await
        .expect("catalog");
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].name, tools[1].name);
}

#[tokio::test]
async fn endless_tokens_hit_the_page_limit() {
    let pages = (0..10)
        .map(|n| page("p", 1, Some(format!("tok{n}").as_str())))
        .collect();
    let pager = ScriptedPager::new(pages);

    let err = list_all_tools(&pager, CatalogLimits { max_pages: 3 })
        .await
        .expect_err("limit");

    match err {
        CatalogError::PageLimitExceeded {
            max_pages,
            collected,
        } => {
            assert_eq!(max_pages, 3);
            assert_eq!(collected, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(pager.calls().await.len(), 3);
}

#[tokio::test]
async fn pager_errors_propagate() {
    let pager = ScriptedPager::new(vec![page("a", 1, Some("A"))]);
    let err = list_all_tools(&pager, CatalogLimits::default())
        .await
        .expect_err("second page missing");
    assert!(matches!(err, CatalogError::Mcp(McpError::EmptyResponse)));
}
