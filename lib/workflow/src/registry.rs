//! Built-in configuration schemas and schema resolution.
//!
//! Catalog entries may omit their configuration schema. For those, the
//! editor falls back to a registry of built-in schemas keyed by
//! `(category, type)`. Each entry is also reachable through its slug,
//! `"{category}_{type}"`, so a node whose type already is a full slug such as
//! `trigger_schedule` finds the same schema.

use crate::catalog::{Catalog, NodeCategory};
use crate::node::GraphNode;
use crate::schema::{ConfigSchema, FieldSpec, SelectOption};
use std::collections::HashMap;

/// Where a resolved schema came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSource {
    /// The node's catalog definition carried a schema.
    Catalog,
    /// The built-in registry had an entry.
    Builtin,
    /// Nothing matched. The node has no configurable fields.
    None,
}

/// A schema together with the place it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub source: SchemaSource,
    pub schema: ConfigSchema,
}

/// Registry of built-in configuration schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    by_pair: HashMap<(NodeCategory, String), ConfigSchema>,
    slugs: HashMap<String, (NodeCategory, String)>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema for `(category, node_type)`.
    pub fn register(
        &mut self,
        category: NodeCategory,
        node_type: impl Into<String>,
        schema: ConfigSchema,
    ) {
        let node_type = node_type.into();
        let slug = format!("{}_{}", category.as_str(), node_type);
        self.slugs.insert(slug, (category, node_type.clone()));
        self.by_pair.insert((category, node_type), schema);
    }

    /// Looks up a schema for a node.
    ///
    /// Tries `(category, node_type)` first, then `node_type` as a full slug.
    #[must_use]
    pub fn lookup(&self, category: NodeCategory, node_type: &str) -> Option<&ConfigSchema> {
        self.by_pair
            .get(&(category, node_type.to_string()))
            .or_else(|| {
                let pair = self.slugs.get(node_type)?;
                self.by_pair.get(pair)
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }

    /// Resolves the form schema for a placed node.
    ///
    /// Order: the catalog definition whose slug equals the node type (or the
    /// node's canvas kind) if it carries a schema, then the registry, then an
    /// empty schema.
    #[must_use]
    pub fn resolve(&self, node: &GraphNode, catalog: &Catalog) -> ResolvedSchema {
        let from_catalog = catalog
            .find_by_slug(&node.node_type)
            .or_else(|| catalog.find_by_slug(node.canvas_kind().as_str()))
            .and_then(|def| def.config_schema.as_ref());

        if let Some(schema) = from_catalog {
            return ResolvedSchema {
                source: SchemaSource::Catalog,
                schema: schema.clone(),
            };
        }

        match self.lookup(node.category, &node.node_type) {
            Some(schema) => ResolvedSchema {
                source: SchemaSource::Builtin,
                schema: schema.clone(),
            },
            None => ResolvedSchema {
                source: SchemaSource::None,
                schema: ConfigSchema::new(),
            },
        }
    }

    /// Builds the registry of built-in schemas.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            NodeCategory::Trigger,
            "schedule",
            ConfigSchema::new()
                .with_field(
                    "cron_expression",
                    FieldSpec::string()
                        .with_label("Cron Expression")
                        .with_placeholder("0 9 * * 1-5")
                        .with_description("When the workflow runs, in cron syntax")
                        .required(),
                )
                .with_field(
                    "timezone",
                    FieldSpec::string()
                        .with_label("Timezone")
                        .with_placeholder("UTC")
                        .with_default("UTC"),
                ),
        );

        registry.register(
            NodeCategory::Trigger,
            "webhook",
            ConfigSchema::new().with_field(
                "secret",
                FieldSpec::string()
                    .with_label("Webhook Secret")
                    .with_description("Shared secret used to verify incoming requests"),
            ),
        );

        registry.register(
            NodeCategory::Trigger,
            "event",
            ConfigSchema::new()
                .with_field(
                    "event_type",
                    FieldSpec::string()
                        .with_label("Event Type")
                        .with_placeholder("deal.updated")
                        .required(),
                )
                .with_field(
                    "filter",
                    FieldSpec::text()
                        .with_label("Filter (JSON)")
                        .with_placeholder("{\"stage\": \"closed\"}"),
                ),
        );

        registry.register(
            NodeCategory::Ai,
            "analyze",
            ConfigSchema::new()
                .with_field(
                    "prompt",
                    FieldSpec::text()
                        .with_label("Analysis Prompt")
                        .with_placeholder("What should be analyzed?")
                        .required(),
                )
                .with_field(
                    "model",
                    FieldSpec::select(vec![
                        SelectOption::new("gpt-4o", "GPT-4o"),
                        SelectOption::new("gpt-4o-mini", "GPT-4o Mini"),
                        SelectOption::new("claude-3-5-sonnet", "Claude 3.5 Sonnet"),
                    ])
                    .with_label("Model")
                    .with_default("gpt-4o-mini"),
                ),
        );

        registry.register(
            NodeCategory::Ai,
            "generate",
            ConfigSchema::new()
                .with_field(
                    "prompt",
                    FieldSpec::text()
                        .with_label("Generation Prompt")
                        .required(),
                )
                .with_field(
                    "output_format",
                    FieldSpec::select(vec![
                        SelectOption::new("text", "Plain Text"),
                        SelectOption::new("json", "JSON"),
                        SelectOption::new("markdown", "Markdown"),
                    ])
                    .with_label("Output Format")
                    .with_default("text"),
                ),
        );

        registry.register(
            NodeCategory::Action,
            "email",
            ConfigSchema::new()
                .with_field(
                    "to",
                    FieldSpec::string()
                        .with_label("To")
                        .with_placeholder("recipient@example.com")
                        .required(),
                )
                .with_field(
                    "subject",
                    FieldSpec::string().with_label("Subject").required(),
                )
                .with_field("body", FieldSpec::text().with_label("Body")),
        );

        registry.register(
            NodeCategory::Action,
            "slack",
            ConfigSchema::new()
                .with_field(
                    "channel",
                    FieldSpec::string()
                        .with_label("Channel")
                        .with_placeholder("#general")
                        .required(),
                )
                .with_field(
                    "message",
                    FieldSpec::text().with_label("Message").required(),
                ),
        );

        registry.register(
            NodeCategory::Action,
            "create_task",
            ConfigSchema::new()
                .with_field(
                    "title",
                    FieldSpec::string().with_label("Task Title").required(),
                )
                .with_field("description", FieldSpec::text().with_label("Description"))
                .with_field(
                    "priority",
                    FieldSpec::select(vec![
                        SelectOption::new("low", "Low"),
                        SelectOption::new("medium", "Medium"),
                        SelectOption::new("high", "High"),
                    ])
                    .with_label("Priority")
                    .with_default("medium"),
                )
                .with_field(
                    "due_in_days",
                    FieldSpec::number()
                        .with_label("Due In (days)")
                        .with_default(3),
                ),
        );

        registry.register(
            NodeCategory::Logic,
            "condition",
            ConfigSchema::new().with_field(
                "condition",
                FieldSpec::text()
                    .with_label("Condition")
                    .with_placeholder("deal.value > 10000")
                    .required(),
            ),
        );

        registry.register(
            NodeCategory::Logic,
            "delay",
            ConfigSchema::new().with_field(
                "seconds",
                FieldSpec::number()
                    .with_label("Delay (seconds)")
                    .with_default(60)
                    .required(),
            ),
        );

        registry.register(
            NodeCategory::Logic,
            "loop",
            ConfigSchema::new().with_field(
                "collection_path",
                FieldSpec::string()
                    .with_label("Collection Path")
                    .with_placeholder("$.items")
                    .required(),
            ),
        );

        registry
    }
}
