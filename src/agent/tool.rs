use futures::future::BoxFuture;
use futures::FutureExt;
use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Map, Value};

use crate::error::{MenuChatError, Result};

/// Caller-supplied values handed to every tool invocation of a run.
pub type ContextVariables = Map<String, Value>;

pub type ToolResult = std::result::Result<String, String>;
pub type ToolFuture<'a> = BoxFuture<'a, ToolResult>;
pub type ToolHandler = Box<
    dyn for<'a> Fn(&'a ContextVariables, &'a ToolArguments) -> ToolFuture<'a> + Send + Sync,
>;

/// Arguments of one tool call, addressed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    /// Parses the raw argument text the model produced. Blank text is an
    /// empty argument set; anything other than a JSON object is rejected.
    pub fn parse(tool_name: &str, raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: Value =
            serde_json::from_str(raw).map_err(|e| MenuChatError::ToolArguments {
                name: tool_name.to_string(),
                message: e.to_string(),
            })?;

        match parsed {
            Value::Object(values) => Ok(Self { values }),
            other => Err(MenuChatError::ToolArguments {
                name: tool_name.to_string(),
                message: format!("expected a JSON object, got {}", other),
            }),
        }
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    pub fn require_str(&self, name: &str) -> std::result::Result<&str, String> {
        self.get_str(name)
            .ok_or_else(|| format!("Missing required argument: {}", name))
    }

    /// Values in the order the model wrote the keys.
    ///
    /// This depends entirely on how the model happened to order the object,
    /// so handlers should prefer [`ToolArguments::get`].
    pub fn positional(&self) -> Vec<&Value> {
        self.values.values().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

/// A named local function an agent exposes to the model.
pub struct Tool {
    pub name: String,
    pub description: String,
    pub parameters: Option<Value>,
    handler: ToolHandler,
}

impl Tool {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: for<'a> Fn(&'a ContextVariables, &'a ToolArguments) -> ToolFuture<'a>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
            handler: Box::new(handler),
        }
    }

    /// Wraps a synchronous function as a tool.
    pub fn from_fn<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ContextVariables, &ToolArguments) -> ToolResult + Send + Sync + 'static,
    {
        Self::new(name, description, move |context, arguments| {
            let result = f(context, arguments);
            async move { result }.boxed()
        })
    }

    /// JSON schema the arguments must satisfy; also advertised to the model.
    pub fn with_parameters(mut self, schema: Value) -> Self {
        self.parameters = Some(schema);
        self
    }

    /// Function definition in the `tools` array of a completion request.
    pub fn definition(&self) -> Value {
        let parameters = self.parameters.clone().unwrap_or_else(|| {
            json!({
                "type": "object",
                "properties": {}
            })
        });

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": parameters,
            }
        })
    }

    pub fn validate(&self, arguments: &ToolArguments) -> std::result::Result<(), String> {
        let Some(schema) = &self.parameters else {
            return Ok(());
        };

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| format!("Invalid tool schema: {}", e))?;

        let instance = arguments.to_value();
        compiled.validate(&instance).map_err(|errors| {
            errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect::<Vec<_>>()
                .join("; ")
        })
    }

    pub async fn call(&self, context: &ContextVariables, arguments: &ToolArguments) -> ToolResult {
        (self.handler)(context, arguments).await
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
