use crate::domain::workflow::WorkflowState;
use crate::ports::repository::WorkflowRepository;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::error::Error;

/// Attributes written when a workflow completes, besides the resolved outputs.
const COMPLETION_ATTRIBUTES: [&str; 3] = ["workflowStatus", "endTime", "encodingOutput"];

/// DynamoAdapter implements WorkflowRepository for AWS DynamoDB.
///
/// Items are keyed by partition key `PK = VIDEO#<guid>` and sort key `SK = METADATA`, and
/// use the camelCase attribute names of the workflow record.
#[derive(Clone)]
pub struct DynamoAdapter {
    client: Client,
    table_name: String,
}

impl DynamoAdapter {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl WorkflowRepository for DynamoAdapter {
    async fn get_workflow(
        &self,
        guid: &str,
    ) -> Result<Option<WorkflowState>, Box<dyn Error + Send + Sync>> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(item_key(guid)))
            .send()
            .await?;

        match resp.item {
            Some(item) => Ok(Some(serde_json::from_value(item_to_json(&item))?)),
            None => Ok(None),
        }
    }

    async fn save_outputs(
        &self,
        state: &WorkflowState,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let record = serde_json::to_value(state)?;
        let Value::Object(outputs) = serde_json::to_value(&state.outputs)? else {
            return Err("resolved outputs did not serialize to an object".into());
        };

        let attributes = COMPLETION_ATTRIBUTES
            .iter()
            .filter_map(|name| record.get(*name).map(|value| (name.to_string(), value.clone())))
            .chain(outputs);

        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(item_key(&state.guid)));
        let mut assignments = Vec::new();
        for (i, (name, value)) in attributes.enumerate() {
            assignments.push(format!("#a{i} = :v{i}"));
            request = request
                .expression_attribute_names(format!("#a{i}"), name)
                .expression_attribute_values(format!(":v{i}"), json_to_attribute(value));
        }

        request
            .update_expression(format!("SET {}", assignments.join(", ")))
            .send()
            .await?;
        Ok(())
    }
}

/// Primary key of a workflow's metadata item.
fn item_key(guid: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("PK".to_string(), AttributeValue::S(format!("VIDEO#{}", guid))),
        ("SK".to_string(), AttributeValue::S("METADATA".to_string())),
    ])
}

fn json_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(items) => {
            AttributeValue::L(items.into_iter().map(json_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| (k, json_to_attribute(v)))
                .collect(),
        ),
    }
}

fn attribute_to_json(attribute: &AttributeValue) -> Value {
    match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => n
            .parse::<Number>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(n.clone())),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::L(items) => Value::Array(items.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => item_to_json(map),
        AttributeValue::Ss(items) => Value::from(items.clone()),
        AttributeValue::Ns(items) => Value::Array(
            items
                .iter()
                .map(|n| attribute_to_json(&AttributeValue::N(n.clone())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Null attributes are left out so record fields fall back to their defaults.
fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(
        item.iter()
            .map(|(k, v)| (k.clone(), attribute_to_json(v)))
            .filter(|(_, v)| !v.is_null())
            .collect::<Map<_, _>>(),
    )
}
