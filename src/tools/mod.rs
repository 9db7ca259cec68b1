//! Callable tools exposed by the server.
//!
//! Each tool describes itself with a [`ToolDefinition`] (name, description,
//! JSON input schema, optional widget metadata) and runs asynchronously
//! against a per-session [`ToolContext`].

pub mod circuit;
pub mod concave;

use crate::data::source::SessionMarkerCache;
use crate::prelude::{Arc, HashMap};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use circuit::ArduinoCircuitBuilderTool;
pub use concave::{GetLandmarkDetailsTool, OpenConcaveEarthTool};

/// Widget a tool result is rendered with, plus its loading messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetMeta {
    pub name: String,
    pub description: String,
    pub invoking: String,
    pub invoked: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetMeta>,
}

/// Props handed to the widget host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPayload {
    pub name: String,
    pub props: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    /// Short text summary for the model
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetPayload>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured_content: None,
            widget: None,
        }
    }

    pub fn with_structured(mut self, content: Value) -> Self {
        self.structured_content = Some(content);
        self
    }

    pub fn with_widget(mut self, name: impl Into<String>, props: Value) -> Self {
        self.widget = Some(WidgetPayload {
            name: name.into(),
            props,
        });
        self
    }
}

/// State owned by one client session
#[derive(Debug, Default)]
pub struct ToolContext {
    pub markers: SessionMarkerCache,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput>;
}

/// Decode tool arguments, treating a missing argument object as `{}`
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| Error::InvalidArguments(format!("{tool}: {e}")))
}

/// Registered tools, listed in registration order
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(OpenConcaveEarthTool);
        registry.register(GetLandmarkDetailsTool);
        registry.register(ArduinoCircuitBuilderTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.definition().name;
        if self.tools.insert(name.clone(), Arc::new(tool)).is_none() {
            self.order.push(name);
        }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub async fn call(&self, name: &str, args: Value, ctx: &ToolContext) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        log::info!("calling tool {name}");
        tool.call(args, ctx).await
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_order() {
        let registry = ToolRegistry::with_builtin_tools();
        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["open-concave-earth", "get-landmark-details", "arduino-circuit-builder"]
        );
    }

    #[test]
    fn test_parse_args_null_is_empty_object() {
        #[derive(Deserialize)]
        struct Args {
            #[serde(default)]
            focus: Option<String>,
        }
        let args: Args = parse_args("t", Value::Null).unwrap();
        assert!(args.focus.is_none());

        let err = parse_args::<Args>("t", serde_json::json!({"focus": 3})).err().unwrap();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::with_builtin_tools();
        let err = registry
            .call("nope", Value::Null, &ToolContext::new())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownTool(name) if name == "nope"));
    }
}
