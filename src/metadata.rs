use {
    crate::{AccessLevel, ArnTemplate, ConditionType, Operator},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// The permission catalogue for one service: its actions, resource types and service-specific condition keys.
///
/// This is the data a [crate::StatementBuilder] is parameterized by. It is normally loaded from JSON:
///
/// ```
/// # use scratchstack_aspen_forge::ServiceMetadata;
/// # use std::str::FromStr;
/// let sqs = ServiceMetadata::from_str(r#"{
///     "prefix": "sqs",
///     "name": "Amazon SQS",
///     "actions": {"SendMessage": {"description": "Delivers a message to the specified queue", "accessLevel": "Write"}},
///     "resourceTypes": {"queue": {"arn": "arn:${Partition}:sqs:${Region}:${Account}:${QueueName}"}}
/// }"#).unwrap();
/// assert!(sqs.action("SendMessage").is_some());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    prefix: String,

    #[serde(default)]
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default)]
    actions: BTreeMap<String, ActionMetadata>,

    #[serde(default)]
    resource_types: BTreeMap<String, ResourceTypeMetadata>,

    /// Service-specific condition keys, by full key name (`dynamodb:LeadingKeys`).
    #[serde(default)]
    conditions: BTreeMap<String, ConditionKeyMetadata>,
}

display_json!(ServiceMetadata);
from_str_json!(ServiceMetadata);

impl ServiceMetadata {
    pub fn new<P: Into<String>, N: Into<String>>(prefix: P, name: N) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            url: None,
            actions: BTreeMap::new(),
            resource_types: BTreeMap::new(),
            conditions: BTreeMap::new(),
        }
    }

    /// The service prefix used in action names and condition keys, e.g. `dynamodb`.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn insert_action<S: Into<String>>(&mut self, name: S, action: ActionMetadata) -> &mut Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn insert_resource_type<S: Into<String>>(&mut self, name: S, resource_type: ResourceTypeMetadata) -> &mut Self {
        self.resource_types.insert(name.into(), resource_type);
        self
    }

    pub fn insert_condition<S: Into<String>>(&mut self, key: S, condition: ConditionKeyMetadata) -> &mut Self {
        self.conditions.insert(key.into(), condition);
        self
    }

    #[inline]
    pub fn action(&self, name: &str) -> Option<&ActionMetadata> {
        self.actions.get(name)
    }

    /// All action names, sorted.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// The names of the actions documented under `level`, sorted.
    pub fn actions_with_access_level(&self, level: AccessLevel) -> Vec<&str> {
        self.actions.iter().filter(|(_, a)| a.access_level == level).map(|(name, _)| name.as_str()).collect()
    }

    #[inline]
    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeMetadata> {
        self.resource_types.get(name)
    }

    pub fn resource_type_names(&self) -> impl Iterator<Item = &str> {
        self.resource_types.keys().map(String::as_str)
    }

    #[inline]
    pub fn condition(&self, key: &str) -> Option<&ConditionKeyMetadata> {
        self.conditions.get(key)
    }

    /// The declared type of a service condition key, if the key is known.
    pub fn condition_type(&self, key: &str) -> Option<ConditionType> {
        self.conditions.get(key).map(|c| c.condition_type)
    }

    /// The operator used for a service condition key when none is named: the key's documented default if it has
    /// one, otherwise its type's family default. `None` if the key is unknown.
    pub fn condition_default_operator(&self, key: &str) -> Option<Operator> {
        self.conditions.get(key).map(ConditionKeyMetadata::default_operator)
    }
}

/// Documentation for a single action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default)]
    description: String,

    access_level: AccessLevel,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    resource_types: BTreeMap<String, ActionResourceType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<String>,
}

impl ActionMetadata {
    pub fn new<S: Into<String>>(access_level: AccessLevel, description: S) -> Self {
        Self {
            url: None,
            description: description.into(),
            access_level,
            resource_types: BTreeMap::new(),
            conditions: Vec::new(),
        }
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// Resource types the action can be scoped to, with whether each is required.
    pub fn resource_types(&self) -> impl Iterator<Item = (&str, bool)> {
        self.resource_types.iter().map(|(name, rt)| (name.as_str(), rt.required))
    }

    #[inline]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionResourceType {
    #[serde(default)]
    pub required: bool,
}

/// A resource type: its ARN template and the condition keys meaningful when it is referenced.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    arn: ArnTemplate,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    condition_keys: Vec<String>,
}

impl ResourceTypeMetadata {
    pub fn new(arn: ArnTemplate) -> Self {
        Self {
            url: None,
            arn,
            condition_keys: Vec::new(),
        }
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn arn(&self) -> &ArnTemplate {
        &self.arn
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionKeyMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default)]
    description: String,

    #[serde(rename = "type", default)]
    condition_type: ConditionType,

    /// Overrides the family default, e.g. `ArnEquals` for an ARN key.
    #[serde(rename = "defaultOperator", default, skip_serializing_if = "Option::is_none")]
    documented_operator: Option<Operator>,
}

impl ConditionKeyMetadata {
    pub fn new<S: Into<String>>(condition_type: ConditionType, description: S) -> Self {
        Self {
            url: None,
            description: description.into(),
            condition_type,
            documented_operator: None,
        }
    }

    pub fn with_default_operator(mut self, operator: Operator) -> Self {
        self.documented_operator = Some(operator);
        self
    }

    pub fn default_operator(&self) -> Operator {
        match &self.documented_operator {
            Some(operator) => operator.clone(),
            None => self.condition_type.default_operator(),
        }
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn condition_type(&self) -> ConditionType {
        self.condition_type
    }
}
