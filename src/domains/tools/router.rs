//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Used by the STDIO transport. One route is generated per registered
//! tool and every route funnels into [`ToolDispatcher::dispatch`], so the
//! MCP surface and the HTTP surface cannot drift apart.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::Tool,
};

use super::dispatcher::ToolDispatcher;
use super::error::ToolError;
use super::handlers::{ToolDescriptor, ToolInvocationRequest};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<ToolDispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    dispatcher
        .registry()
        .list_tools()
        .into_iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(descriptor, dispatcher.clone()))
        })
}

/// MCP metadata for a descriptor.
pub fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool {
        name: descriptor.name.clone().into(),
        description: Some(descriptor.description.clone().into()),
        input_schema: Arc::new(descriptor.schema.to_json_object()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

fn create_route<S>(descriptor: ToolDescriptor, dispatcher: Arc<ToolDispatcher>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let tool = to_mcp_tool(&descriptor);
    let name = descriptor.name;

    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let parameters = ctx.arguments.clone();
        let dispatcher = dispatcher.clone();
        let name = name.clone();
        async move {
            let request = ToolInvocationRequest {
                tool_name: name,
                parameters,
            };
            dispatcher
                .dispatch(request)
                .await
                .map(|result| result.into_call_tool_result())
                .map_err(to_mcp_error)
        }
        .boxed()
    })
}

fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::NotFound(_) | ToolError::MissingParameter(_) | ToolError::InvalidArguments(_) => {
            McpError::invalid_params(err.to_string(), None)
        }
        ToolError::DataStore(_) => McpError::internal_error(err.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::store::MemoryItemStore;

    struct TestServer {}

    fn test_dispatcher() -> Arc<ToolDispatcher> {
        Arc::new(ToolDispatcher::new(
            Arc::new(ToolRegistry::with_defaults()),
            Arc::new(MemoryItemStore::new()),
        ))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_dispatcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"items_table"));
        assert!(names.contains(&"create_item"));
    }

    #[test]
    fn test_registry_matches_router() {
        let dispatcher = test_dispatcher();
        let registry_names: Vec<String> = dispatcher
            .registry()
            .tool_names()
            .into_iter()
            .map(String::from)
            .collect();

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.to_string()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_mcp_tool_schema() {
        let descriptor = ToolRegistry::with_defaults()
            .describe("create_item")
            .unwrap()
            .clone();
        let tool = to_mcp_tool(&descriptor);
        assert_eq!(tool.input_schema["required"], serde_json::json!(["name"]));
    }
}
