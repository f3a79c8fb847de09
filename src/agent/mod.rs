//! A minimal agent loop: send the history, run any tools the model asks
//! for, feed the results back, repeat.

mod swarm;
mod tool;

pub use swarm::{RunOptions, RunResponse, Swarm, ToolPolicy};
pub use tool::{ContextVariables, Tool, ToolArguments, ToolFuture, ToolHandler, ToolResult};

use serde_json::Value;

/// The persona driving a run: instructions sent as the system message, an
/// optional model override and the tools the model may call.
#[derive(Debug)]
pub struct Agent {
    pub name: String,
    pub instructions: String,
    pub model: Option<String>,
    pub tools: Vec<Tool>,
}

impl Agent {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: None,
            tools: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn tool_definitions(&self) -> Vec<Value> {
        self.tools.iter().map(Tool::definition).collect()
    }
}
