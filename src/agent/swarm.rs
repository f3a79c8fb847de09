use colored::*;

use super::tool::{ContextVariables, ToolArguments};
use super::Agent;
use crate::api::response::first_message;
use crate::api::{CompletionBackend, RequestBody};
use crate::config::DEFAULT_MODEL;
use crate::error::{MenuChatError, Result};
use crate::models::{Message, ToolCall};

/// What to do when the model calls a tool the agent does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolPolicy {
    /// Record a tool message with no content and keep going.
    #[default]
    Permissive,
    /// Fail the run with [`MenuChatError::UnknownTool`].
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub context_variables: ContextVariables,
    /// Upper bound on completion requests; `None` means unbounded.
    pub max_turns: Option<usize>,
    pub debug: bool,
    pub tool_policy: ToolPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResponse {
    /// Name of the agent that produced the last reply.
    pub agent: String,
    /// Completion requests issued during the run.
    pub turns: usize,
}

pub struct Swarm<B> {
    backend: B,
    default_model: String,
}

impl<B: CompletionBackend> Swarm<B> {
    pub fn new(backend: B) -> Self {
        Self::with_default_model(backend, DEFAULT_MODEL)
    }

    pub fn with_default_model(backend: B, default_model: impl Into<String>) -> Self {
        Self {
            backend,
            default_model: default_model.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Drives `agent` over `messages` until a reply requests no tool call or
    /// `max_turns` requests have been made.
    ///
    /// Every reply and tool result is appended to `messages`; the system
    /// message is rebuilt from the agent for each request and never stored.
    /// Transport errors, handler failures and unparseable tool arguments end
    /// the run with an error, leaving whatever was appended so far in place.
    pub async fn run(
        &self,
        agent: &Agent,
        messages: &mut Vec<Message>,
        options: RunOptions,
    ) -> Result<RunResponse> {
        let max_turns = options.max_turns.unwrap_or(usize::MAX);
        let tools = agent.tool_definitions();
        let mut turns = 0;

        while turns < max_turns {
            let model = agent
                .model
                .clone()
                .unwrap_or_else(|| self.default_model.clone());

            let mut history = Vec::with_capacity(messages.len() + 1);
            history.push(Message::system(agent.instructions.clone()));
            history.extend(messages.iter().cloned());

            let request = RequestBody::new(model, history).with_tools(tools.clone());
            let response = self.backend.complete(&request).await?;
            let message = first_message(&response)?.clone();
            turns += 1;

            tracing::debug!(
                agent = %agent.name,
                turn = turns,
                tool_calls = message.tool_calls.as_ref().map(Vec::len).unwrap_or(0),
                "agent replied"
            );
            if options.debug {
                eprintln!(
                    "{}",
                    format!(
                        "{}: {}",
                        agent.name,
                        message.content.as_deref().unwrap_or("")
                    )
                    .dimmed()
                );
            }

            let tool_calls = if message.requests_tools() {
                message.tool_calls.clone()
            } else {
                None
            };
            messages.push(message);

            let Some(tool_calls) = tool_calls else {
                break;
            };

            // An agent without tools leaves the calls unanswered and asks again.
            if !agent.tools.is_empty() {
                for call in &tool_calls {
                    let result = self.execute_tool(agent, call, &options).await?;
                    messages.push(result);
                }
            }
        }

        Ok(RunResponse {
            agent: agent.name.clone(),
            turns,
        })
    }

    async fn execute_tool(
        &self,
        agent: &Agent,
        call: &ToolCall,
        options: &RunOptions,
    ) -> Result<Message> {
        let name = call.function.name.as_str();

        let Some(tool) = agent.tool(name) else {
            return match options.tool_policy {
                ToolPolicy::Strict => Err(MenuChatError::UnknownTool(name.to_string())),
                ToolPolicy::Permissive => {
                    tracing::warn!(tool = name, agent = %agent.name, "model called an undeclared tool");
                    Ok(Message::tool_result(&call.id, None))
                }
            };
        };

        let arguments = ToolArguments::parse(name, &call.function.arguments)?;
        if let Err(e) = tool.validate(&arguments) {
            tracing::warn!(tool = name, error = %e, "tool arguments failed schema validation");
            return Ok(Message::tool_result(&call.id, Some(format!("Error: {}", e))));
        }

        tracing::debug!(tool = name, arguments = arguments.len(), "calling tool");
        let output = tool
            .call(&options.context_variables, &arguments)
            .await
            .map_err(|e| MenuChatError::ToolError(format!("{}: {}", name, e)))?;

        Ok(Message::tool_result(&call.id, Some(output)))
    }
}
