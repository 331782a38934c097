use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::application::{AppError, ExpenseService, DEFAULT_BUDGET_DAYS, DEFAULT_SUMMARY_DAYS};
use crate::domain::{category_listing, payment_method_listing, ExpenseInput};

use super::prompts::{find_prompt, ALL_PROMPTS};
use super::render;

pub const EXPENSES_URI: &str = "resources://expenses";
pub const CATEGORIES_URI: &str = "resources://categories";
pub const PAYMENT_METHODS_URI: &str = "resources://payment_methods";

/// An amount given either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum AmountArg {
    Number(f64),
    Text(String),
}

impl AmountArg {
    fn into_text(self) -> String {
        match self {
            AmountArg::Number(value) => value.to_string(),
            AmountArg::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddExpenseRequest {
    /// Date of the expense, YYYY-MM-DD (e.g. 2025-11-22)
    pub date: String,
    /// Food | Transport | Entertainment | Utilities | Health | Education | Other
    pub category: String,
    /// Positive amount, at most 2 decimals
    pub amount: AmountArg,
    /// cash | card | transfer
    pub payment_method: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SummaryRequest {
    /// Days to look back (1-365, default 7)
    #[serde(default = "default_summary_days")]
    pub days: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BudgetRequest {
    /// Category to check
    pub category: String,
    /// Budget limit for the period
    pub limit: AmountArg,
    /// Period in days (1-365, default 30)
    #[serde(default = "default_budget_days")]
    pub days: i64,
}

fn default_summary_days() -> i64 {
    DEFAULT_SUMMARY_DAYS
}

fn default_budget_days() -> i64 {
    DEFAULT_BUDGET_DAYS
}

/// MCP server exposing the expense ledger as tools, resources and prompts.
#[derive(Clone)]
pub struct ExpenseServer {
    service: ExpenseService,
    tool_router: ToolRouter<ExpenseServer>,
}

#[tool_router]
impl ExpenseServer {
    pub fn new(service: ExpenseService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Record an expense in the ledger")]
    async fn add_expense(
        &self,
        Parameters(request): Parameters<AddExpenseRequest>,
    ) -> Result<CallToolResult, McpError> {
        let input = ExpenseInput {
            date: request.date,
            category: request.category,
            amount: request.amount.into_text(),
            payment_method: request.payment_method,
        };
        match self.service.add_expense(&input, ExpenseService::today()) {
            Ok(expense) => Ok(CallToolResult::success(vec![Content::text(
                render::expense_recorded(&expense),
            )])),
            Err(e) => tool_error(e),
        }
    }

    #[tool(description = "Summarize expenses of the last N days")]
    async fn get_summary(
        &self,
        Parameters(request): Parameters<SummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.summary(request.days, ExpenseService::today()) {
            Ok(summary) => Ok(CallToolResult::success(vec![Content::text(
                render::summary(&summary),
            )])),
            Err(e) => tool_error(e),
        }
    }

    #[tool(description = "Check how much of a category budget has been spent")]
    async fn check_budget(
        &self,
        Parameters(request): Parameters<BudgetRequest>,
    ) -> Result<CallToolResult, McpError> {
        let limit = request.limit.into_text();
        match self.service.check_budget(
            &request.category,
            &limit,
            request.days,
            ExpenseService::today(),
        ) {
            Ok(check) => Ok(CallToolResult::success(vec![Content::text(render::budget(
                &check,
            ))])),
            Err(e) => tool_error(e),
        }
    }

    fn read_resource_text(&self, uri: &str) -> Result<String, McpError> {
        match uri {
            EXPENSES_URI => self.service.export_json().map_err(|e| {
                error!(error = %e, "failed to export expenses");
                McpError::internal_error(e.to_string(), None)
            }),
            CATEGORIES_URI => to_json(&category_listing()),
            PAYMENT_METHODS_URI => to_json(&payment_method_listing()),
            _ => Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            )),
        }
    }
}

/// Validation failures are reported to the caller as tool errors;
/// storage failures abort the request.
fn tool_error(e: AppError) -> Result<CallToolResult, McpError> {
    if e.is_validation() {
        Ok(CallToolResult::error(vec![Content::text(format!(
            "Error: {}",
            e
        ))]))
    } else {
        error!(error = %e, "tool call failed");
        Err(McpError::internal_error(e.to_string(), None))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

fn json_resource(uri: &str, name: &str, description: &str) -> Resource {
    let mut raw = RawResource::new(uri, name.to_string());
    raw.description = Some(description.to_string());
    raw.mime_type = Some("application/json".to_string());
    raw.no_annotation()
}

#[tool_handler]
impl ServerHandler for ExpenseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Expense ledger. Record expenses with add_expense, read them from \
                 resources://expenses, and use get_summary or check_budget for reports."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                json_resource(EXPENSES_URI, "expenses", "All recorded expenses"),
                json_resource(CATEGORIES_URI, "categories", "Valid expense categories"),
                json_resource(
                    PAYMENT_METHODS_URI,
                    "payment_methods",
                    "Valid payment methods",
                ),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!(uri = %request.uri, "reading resource");
        let text = self.read_resource_text(&request.uri)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: ALL_PROMPTS
                .iter()
                .map(|p| Prompt::new(p.name, Some(p.description), None))
                .collect(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        GetPromptRequestParam { name, .. }: GetPromptRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let prompt = find_prompt(&name)
            .ok_or_else(|| McpError::invalid_params(format!("unknown prompt: {}", name), None))?;
        Ok(GetPromptResult {
            description: Some(prompt.description.to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                prompt.text,
            )],
        })
    }
}
