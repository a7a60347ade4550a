use {
    crate::{
        action::action_glob,
        condition::{ConditionEntry, Conditions},
        resource::{deserialize_resources, serialize_resources},
        serutil::StringList,
        AccessLevel, Action, ActionSet, Effect, GlobalConditionKey, Operator, PolicyBuilderError, ResourceArn,
        ResourceScope, Scope, ServiceMetadata,
    },
    log::{debug, trace},
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        str::FromStr,
        sync::Arc,
    },
};

/// A rendered policy statement.
///
/// In a policy document this appears as:
/// ```json
/// {
///     "Sid": "ReadBooks",
///     "Effect": "Allow",
///     "Action": ["dynamodb:GetItem", "dynamodb:Query"],
///     "Resource": ["arn:aws:dynamodb:*:*:table/Books"],
///     "Condition": {"StringLike": {"dynamodb:LeadingKeys": "user-1"}}
/// }
/// ```
///
/// No resources means the statement applies to every resource; this renders as `"Resource": "*"`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    sid: Option<String>,

    effect: Effect,

    #[serde(skip_serializing_if = "ActionSet::is_empty")]
    action: ActionSet,

    #[serde(serialize_with = "serialize_resources")]
    resource: Vec<ResourceArn>,

    #[serde(skip_serializing_if = "Conditions::is_empty")]
    condition: Conditions,
}

impl Statement {
    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn actions(&self) -> &ActionSet {
        &self.action
    }

    #[inline]
    pub fn resources(&self) -> &[ResourceArn] {
        &self.resource
    }

    #[inline]
    pub fn applies_to_all_resources(&self) -> bool {
        self.resource.is_empty()
    }

    #[inline]
    pub fn conditions(&self) -> &Conditions {
        &self.condition
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor {})
    }
}

struct StatementVisitor;
impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("a map of statement properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Statement, A::Error> {
        struct Resources(Vec<ResourceArn>);

        impl<'de> Deserialize<'de> for Resources {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_resources(deserializer).map(Resources)
            }
        }

        let mut sid: Option<String> = None;
        let mut effect: Option<Effect> = None;
        let mut action: Option<ActionSet> = None;
        let mut resource: Option<Vec<ResourceArn>> = None;
        let mut condition: Option<Conditions> = None;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "Sid" => {
                    if sid.is_some() {
                        return Err(de::Error::duplicate_field("Sid"));
                    }

                    sid = Some(access.next_value::<String>()?);
                }
                "Effect" => {
                    if effect.is_some() {
                        return Err(de::Error::duplicate_field("Effect"));
                    }

                    effect = Some(access.next_value::<Effect>()?);
                }
                "Action" => {
                    if action.is_some() {
                        return Err(de::Error::duplicate_field("Action"));
                    }

                    action = Some(access.next_value::<ActionSet>()?);
                }
                "Resource" => {
                    if resource.is_some() {
                        return Err(de::Error::duplicate_field("Resource"));
                    }

                    resource = Some(access.next_value::<Resources>()?.0);
                }
                "Condition" => {
                    if condition.is_some() {
                        return Err(de::Error::duplicate_field("Condition"));
                    }

                    condition = Some(access.next_value::<Conditions>()?);
                }
                _ => {
                    return Err(de::Error::unknown_field(
                        key.as_str(),
                        &["Sid", "Effect", "Action", "Resource", "Condition"],
                    ));
                }
            }
        }

        Ok(Statement {
            sid,
            effect: effect.ok_or_else(|| de::Error::missing_field("Effect"))?,
            action: action.unwrap_or_default(),
            resource: resource.unwrap_or_default(),
            condition: condition.unwrap_or_default(),
        })
    }
}

/// Accumulates the actions, resources and conditions of a statement for one service.
///
/// The builder is parameterized by the service's [ServiceMetadata] and a [Scope] supplying default partition,
/// account and region. Mutators chain through `&mut Self`; those that can fail return a [Result] so chains use `?`:
///
/// ```
/// # use scratchstack_aspen_forge::{Scope, ServiceMetadata, StatementBuilder};
/// # use std::{str::FromStr, sync::Arc};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let sqs = ServiceMetadata::from_str(r#"{"prefix": "sqs",
/// #     "resourceTypes": {"queue": {"arn": "arn:${Partition}:sqs:${Region}:${Account}:${QueueName}"}}}"#)?;
/// let mut builder = StatementBuilder::new(Arc::new(sqs), Scope::default());
/// builder.sid("Send").to("SendMessage")?.on("queue", &["orders"])?;
///
/// let statement = builder.render();
/// assert_eq!(statement.actions().to_strings(), vec!["sqs:SendMessage"]);
/// assert_eq!(statement.resources()[0].to_string(), "arn:aws:sqs:*:*:orders");
/// # Ok(())
/// # }
/// ```
///
/// Rendering does not consume or reset the builder; later mutations show up in later renders.
#[derive(Clone, Debug)]
pub struct StatementBuilder {
    service: Arc<ServiceMetadata>,
    scope: Scope,
    sid: Option<String>,
    effect: Effect,
    actions: ActionSet,
    resources: Vec<ResourceArn>,
    conditions: Conditions,
}

impl StatementBuilder {
    pub fn new(service: Arc<ServiceMetadata>, scope: Scope) -> Self {
        Self {
            service,
            scope,
            sid: None,
            effect: Effect::Allow,
            actions: ActionSet::new(),
            resources: Vec::new(),
            conditions: Conditions::new(),
        }
    }

    #[inline]
    pub fn service(&self) -> &ServiceMetadata {
        &self.service
    }

    #[inline]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn sid<S: Into<String>>(&mut self, sid: S) -> &mut Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn allow(&mut self) -> &mut Self {
        self.effect = Effect::Allow;
        self
    }

    pub fn deny(&mut self) -> &mut Self {
        self.effect = Effect::Deny;
        self
    }

    /// Select the action `name` of this service. The name is not checked against the metadata; see
    /// [StatementBuilder::unknown_permissions].
    pub fn to(&mut self, name: &str) -> Result<&mut Self, PolicyBuilderError> {
        let action = Action::new(self.service.prefix(), name)?;
        trace!("Selecting action {}", action);
        self.actions.insert(action);
        Ok(self)
    }

    /// Select every action of this service (`service:*`).
    pub fn to_all_actions(&mut self) -> Result<&mut Self, PolicyBuilderError> {
        self.to("*")
    }

    /// Select every known action documented under `level`, in name order.
    pub fn to_access_level(&mut self, level: AccessLevel) -> Result<&mut Self, PolicyBuilderError> {
        let service = Arc::clone(&self.service);
        let names = service.actions_with_access_level(level);
        if names.is_empty() {
            debug!("Service {} has no actions with access level {}", service.prefix(), level);
        }

        for name in names {
            self.to(name)?;
        }
        Ok(self)
    }

    /// Select every known action whose name matches `glob` (`*` and `?` wildcards, case-insensitive).
    pub fn to_matching(&mut self, glob: &str) -> Result<&mut Self, PolicyBuilderError> {
        let re = action_glob(glob)?;
        let service = Arc::clone(&self.service);
        for name in service.action_names().filter(|name| re.is_match(name)) {
            self.to(name)?;
        }
        Ok(self)
    }

    /// Scope the statement to a resource of type `resource_type`, filling the type's ARN template with `ids` and
    /// the scope defaults.
    pub fn on(&mut self, resource_type: &str, ids: &[&str]) -> Result<&mut Self, PolicyBuilderError> {
        self.on_with(resource_type, ids, &ResourceScope::default())
    }

    /// As [StatementBuilder::on], with explicit partition, account or region values taking precedence over the
    /// scope defaults.
    pub fn on_with(
        &mut self,
        resource_type: &str,
        ids: &[&str],
        overrides: &ResourceScope,
    ) -> Result<&mut Self, PolicyBuilderError> {
        let Some(rt) = self.service.resource_type(resource_type) else {
            debug!("Service {} has no resource type {}", self.service.prefix(), resource_type);
            return Err(PolicyBuilderError::UnknownResourceType {
                service: self.service.prefix().to_string(),
                resource_type: resource_type.to_string(),
            });
        };

        let arn = rt.arn().resolve(self.service.prefix(), ids, overrides, &self.scope)?;
        trace!("Adding resource {}", arn);
        self.resources.push(arn);
        Ok(self)
    }

    /// Scope the statement to a literal resource ARN, which may contain wildcards.
    pub fn on_arn(&mut self, arn: &str) -> Result<&mut Self, PolicyBuilderError> {
        let arn = ResourceArn::from_str(arn)?;
        trace!("Adding resource {}", arn);
        self.resources.push(arn);
        Ok(self)
    }

    /// Remove all resources; the statement applies to every resource.
    pub fn on_all_resources(&mut self) -> &mut Self {
        self.resources.clear();
        self
    }

    /// Add a condition using the key's default operator.
    pub fn if_condition<V: Into<StringList>>(&mut self, key: &str, values: V) -> &mut Self {
        self.if_key(key, values, None)
    }

    /// Add a condition on a boolean key, such as `aws:SecureTransport`. The value defaults to `true`.
    pub fn if_bool(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        self.if_key(key, value.unwrap_or(true), None)
    }

    /// Add a condition, replacing any condition already on `key`.
    ///
    /// A key without a `:` is taken to belong to this service and is prefixed with the service prefix. Without an
    /// operator, the default is the documented one for a global `aws:` key, then the documented one for a service
    /// key, then the family default for the key's declared type, otherwise `StringLike`.
    pub fn if_key<V: Into<StringList>>(&mut self, key: &str, values: V, operator: Option<Operator>) -> &mut Self {
        let key = if key.contains(':') {
            key.to_string()
        } else {
            format!("{}:{}", self.service.prefix(), key)
        };

        let operator = operator.unwrap_or_else(|| self.default_operator(&key));
        trace!("Condition {} {} set", operator, key);
        self.conditions.insert(key, ConditionEntry::new(operator, values));
        self
    }

    /// Add a condition on a key parameterized by `sub_key`, such as `ResourceTag/<tag name>`.
    pub fn if_key_param<V: Into<StringList>>(
        &mut self,
        key: &str,
        sub_key: &str,
        values: V,
        operator: Option<Operator>,
    ) -> &mut Self {
        self.if_key(&format!("{}/{}", key, sub_key), values, operator)
    }

    /// Add a condition on a global `aws:` key. `sub_key` supplies the tag name for the tag keys and is ignored
    /// otherwise.
    pub fn if_global<V: Into<StringList>>(
        &mut self,
        key: GlobalConditionKey,
        sub_key: Option<&str>,
        values: V,
        operator: Option<Operator>,
    ) -> &mut Self {
        self.if_key(&key.key(sub_key), values, operator)
    }

    fn default_operator(&self, key: &str) -> Operator {
        if let Some(global) = GlobalConditionKey::lookup(key) {
            return global.default_operator();
        }

        match self.service.condition_default_operator(key) {
            Some(operator) => operator,
            None => {
                trace!("No declared type for condition key {}; using StringLike", key);
                crate::condition::ConditionType::STRING.default_operator()
            }
        }
    }

    #[inline]
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    #[inline]
    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    #[inline]
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Selected actions that do not name a known action of the service. A wildcard action is unknown if it matches
    /// no known action.
    pub fn unknown_permissions(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter(|action| {
                if action.is_wildcard() {
                    match action_glob(action.action()) {
                        Ok(re) => !self.service.action_names().any(|name| re.is_match(name)),
                        Err(_) => true,
                    }
                } else {
                    self.service.action(action.action()).is_none()
                }
            })
            .map(Action::to_string)
            .collect()
    }

    /// Render the current state.
    pub fn render(&self) -> Statement {
        Statement {
            sid: self.sid.clone(),
            effect: self.effect,
            action: self.actions.clone(),
            resource: self.resources.clone(),
            condition: self.conditions.clone(),
        }
    }

    /// Render the current state, failing if no action was selected.
    pub fn render_strict(&self) -> Result<Statement, PolicyBuilderError> {
        if self.actions.is_empty() {
            debug!("Refusing to render a statement without actions");
            return Err(PolicyBuilderError::EmptyStatement);
        }

        Ok(self.render())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{Statement, StatementBuilder},
        crate::{
            condop, metadata::tests::dynamodb, AccessLevel, ActionMetadata, ArnTemplate, ConditionKeyMetadata,
            ConditionType, Effect, GlobalConditionKey, Operator, PlaceholderPolicy, PolicyBuilderError,
            ResourceScope, ResourceTypeMetadata, Scope, ServiceMetadata, StringList, ValueType,
        },
        indoc::indoc,
        pretty_assertions::{assert_eq, assert_ne},
        std::{str::FromStr, sync::Arc},
    };

    fn ddb_builder() -> StatementBuilder {
        StatementBuilder::new(Arc::new(dynamodb()), Scope::default())
    }

    fn svc_builder(scope: Scope) -> StatementBuilder {
        let mut svc = ServiceMetadata::new("svc", "Example");
        svc.insert_action("Read", ActionMetadata::new(AccessLevel::Read, "Reads"))
            .insert_action("Write", ActionMetadata::new(AccessLevel::Write, "Writes"))
            .insert_resource_type(
                "resource",
                ResourceTypeMetadata::new(
                    ArnTemplate::from_str("arn:${Partition}:svc:${Region}:${Account}:resource/${Id}").unwrap(),
                ),
            );
        StatementBuilder::new(Arc::new(svc), scope)
    }

    #[test_log::test]
    fn test_empty_render() {
        let b = ddb_builder();
        let s = b.render();
        assert_eq!(s.effect(), Effect::Allow);
        assert!(s.sid().is_none());
        assert!(s.actions().is_empty());
        assert!(s.applies_to_all_resources());
        assert!(s.conditions().is_empty());

        assert_eq!(
            s.to_string(),
            indoc! {r#"
            {
                "Effect": "Allow",
                "Resource": "*"
            }"#}
        );

        assert_eq!(b.render_strict().unwrap_err(), PolicyBuilderError::EmptyStatement);
    }

    #[test_log::test]
    fn test_idempotent_render() {
        let mut b = ddb_builder();
        b.sid("Read").to("GetItem").unwrap().on("table", &["Books"]).unwrap().if_condition("LeadingKeys", "u1");

        let first = b.render();
        let second = b.render();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());

        // Mutation after rendering shows up in the next render only.
        b.to("PutItem").unwrap();
        let third = b.render();
        assert_ne!(first, third);
        assert_eq!(first.actions().len(), 1);
        assert_eq!(third.actions().len(), 2);
    }

    #[test_log::test]
    fn test_dedup_and_order() {
        let mut b1 = ddb_builder();
        b1.to("GetItem").unwrap().to("PutItem").unwrap().to("GetItem").unwrap();

        let mut b2 = ddb_builder();
        b2.to("PutItem").unwrap().to("GetItem").unwrap();

        let s1 = b1.render();
        let s2 = b2.render();
        assert_eq!(s1.actions().to_strings(), vec!["dynamodb:GetItem", "dynamodb:PutItem"]);
        assert_eq!(s2.actions().to_strings(), vec!["dynamodb:PutItem", "dynamodb:GetItem"]);
        assert_eq!(s1.actions(), s2.actions());

        assert_eq!(b1.to("Get:Item").unwrap_err(), PolicyBuilderError::InvalidAction("dynamodb:Get:Item".to_string()));
    }

    #[test_log::test]
    fn test_template_substitution() {
        let mut b = svc_builder(Scope::default());
        b.on("resource", &["myId"]).unwrap();
        assert_eq!(b.render().resources()[0].to_string(), "arn:aws:svc:*:*:resource/myId");

        let mut svc = ServiceMetadata::new("svc", "Example");
        svc.insert_resource_type(
            "resource",
            ResourceTypeMetadata::new(
                ArnTemplate::from_str("arn:${Partition}:${Service}:${Region}:${Account}:resource/${Id}").unwrap(),
            ),
        );
        let mut b = StatementBuilder::new(Arc::new(svc), Scope::default());
        b.on("resource", &["myId"]).unwrap();
        assert_eq!(b.render().resources()[0].to_string(), "arn:aws:svc:*:*:resource/myId");
    }

    #[test_log::test]
    fn test_override_precedence() {
        let scope = Scope::builder().account("111111111111").region("us-east-1").build().unwrap();
        let mut b = svc_builder(scope);
        let overrides = ResourceScope::builder().account("222222222222").build().unwrap();

        b.on_with("resource", &["a"], &overrides).unwrap().on("resource", &["b"]).unwrap();
        let mut plain = svc_builder(Scope::default());
        plain.on("resource", &["c"]).unwrap();

        let resources: Vec<String> = b.render().resources().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            resources,
            vec!["arn:aws:svc:us-east-1:222222222222:resource/a", "arn:aws:svc:us-east-1:111111111111:resource/b"]
        );
        assert_eq!(plain.render().resources()[0].to_string(), "arn:aws:svc:*:*:resource/c");
    }

    #[test_log::test]
    fn test_multi_resource_order_and_all() {
        let mut b = ddb_builder();
        b.to("Query")
            .unwrap()
            .on("table", &["Books"])
            .unwrap()
            .on("index", &["Books", "ByAuthor"])
            .unwrap()
            .on_arn("arn:aws:dynamodb:us-west-2:123456789012:table/Legacy")
            .unwrap();
        assert!(b.has_resources());

        let s = b.render();
        let resources: Vec<String> = s.resources().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            resources,
            vec![
                "arn:aws:dynamodb:*:*:table/Books",
                "arn:aws:dynamodb:*:*:table/Books/index/ByAuthor",
                "arn:aws:dynamodb:us-west-2:123456789012:table/Legacy",
            ]
        );

        b.on_all_resources();
        assert!(!b.has_resources());
        assert!(b.render().applies_to_all_resources());

        assert_eq!(
            b.on("view", &["x"]).unwrap_err(),
            PolicyBuilderError::UnknownResourceType {
                service: "dynamodb".to_string(),
                resource_type: "view".to_string(),
            }
        );
        assert_eq!(
            b.on_arn("table/Books").unwrap_err(),
            PolicyBuilderError::InvalidResource("table/Books".to_string())
        );
    }

    #[test_log::test]
    fn test_strict_placeholders() {
        let strict = Scope::builder().placeholder_policy(PlaceholderPolicy::Strict).build().unwrap();
        let mut b = StatementBuilder::new(Arc::new(dynamodb()), strict);
        assert!(matches!(b.on("index", &["Books"]), Err(PolicyBuilderError::UnresolvedPlaceholder { .. })));
        assert!(!b.has_resources());

        let mut b = ddb_builder();
        b.on("index", &["Books"]).unwrap();
        assert_eq!(b.render().resources()[0].resource(), "table/Books/index/*");
    }

    #[test_log::test]
    fn test_condition_overwrite() {
        let mut b = ddb_builder();
        b.if_key("k", ["v1"], None).if_key("k", ["v2"], Some(Operator::from("op2")));
        assert!(b.has_conditions());

        let s = b.render();
        assert_eq!(s.conditions().len(), 1);
        let entry = s.conditions().get("dynamodb:k").unwrap();
        assert_eq!(entry.values(), &StringList::from(["v2"]));
        assert_eq!(entry.operator().to_string(), "op2");
    }

    #[test_log::test]
    fn test_default_operators() {
        let mut b = ddb_builder();
        b.if_condition("LeadingKeys", "u1")
            .if_condition("FullTableScan", false)
            .if_condition("Unlisted", "x")
            .if_condition("aws:SourceIp", "10.0.0.0/8")
            .if_global(GlobalConditionKey::MultiFactorAuthAge, None, 3600i64, None)
            .if_global(GlobalConditionKey::CalledVia, None, ["athena.amazonaws.com"], None)
            .if_global(GlobalConditionKey::ResourceTag, Some("team"), "blue", None)
            .if_key_param("aws:RequestTag", "owner", "me", Some(Operator::from(condop::StringEquals)))
            .if_key("s3:prefix", "home/", Some(Operator::from(condop::StringLike).if_exists()));

        let table = [
            ("dynamodb:LeadingKeys", "StringLike"),
            ("dynamodb:FullTableScan", "Bool"),
            ("dynamodb:Unlisted", "StringLike"),
            ("aws:SourceIp", "IpAddress"),
            ("aws:MultiFactorAuthAge", "NumericLessThan"),
            ("aws:CalledVia", "ForAnyValue:StringEquals"),
            ("aws:ResourceTag/team", "StringLike"),
            ("aws:RequestTag/owner", "StringEquals"),
            ("s3:prefix", "StringLikeIfExists"),
        ];

        let s = b.render();
        assert_eq!(s.conditions().len(), table.len());
        for (key, op) in table {
            assert_eq!(s.conditions()[key].operator().to_string(), op, "operator for {}", key);
        }
        assert_eq!(s.conditions()["dynamodb:FullTableScan"].values().to_vec(), vec!["false"]);
        assert_eq!(s.conditions()["aws:MultiFactorAuthAge"].values().to_vec(), vec!["3600"]);
    }

    #[test_log::test]
    fn test_documented_operators() {
        let mut svc = ServiceMetadata::new("svc", "Example");
        svc.insert_condition("svc:Tags", ConditionKeyMetadata::new(ConditionType::array_of(ValueType::String), "Tags"))
            .insert_condition(
                "svc:InstanceProfile",
                ConditionKeyMetadata::new(ConditionType::single(ValueType::Arn), "Profile")
                    .with_default_operator(Operator::from(condop::ArnEquals)),
            )
            .insert_condition("svc:Role", ConditionKeyMetadata::new(ConditionType::single(ValueType::Arn), "Role"));

        let mut b = StatementBuilder::new(Arc::new(svc), Scope::default());
        b.if_condition("Tags", "x")
            .if_condition("InstanceProfile", "arn:aws:iam::123456789012:instance-profile/web")
            .if_condition("Role", "arn:aws:iam::*:role/*")
            .if_global(GlobalConditionKey::TagKeys, None, ["team"], None);

        let s = b.render();
        assert_eq!(s.conditions()["svc:Tags"].operator().to_string(), "StringLike");
        assert_eq!(s.conditions()["svc:InstanceProfile"].operator().to_string(), "ArnEquals");
        assert_eq!(s.conditions()["svc:Role"].operator().to_string(), "ArnLike");
        assert_eq!(s.conditions()["aws:TagKeys"].operator().to_string(), "StringLike");
    }

    #[test_log::test]
    fn test_bool_conditions() {
        let mut b = ddb_builder();
        b.if_bool("FullTableScan", None)
            .if_bool("aws:SecureTransport", None)
            .if_global(GlobalConditionKey::MultiFactorAuthPresent, None, true, None)
            .if_bool("aws:MultiFactorAuthPresent", Some(false));

        let s = b.render();
        assert_eq!(s.conditions()["dynamodb:FullTableScan"].operator().to_string(), "Bool");
        assert_eq!(s.conditions()["dynamodb:FullTableScan"].values().to_vec(), vec!["true"]);
        assert_eq!(s.conditions()["aws:SecureTransport"].values().to_vec(), vec!["true"]);
        assert_eq!(s.conditions()["aws:MultiFactorAuthPresent"].operator().to_string(), "Bool");
        assert_eq!(s.conditions()["aws:MultiFactorAuthPresent"].values().to_vec(), vec!["false"]);
    }

    #[test_log::test]
    fn test_bulk_selection() {
        let mut b = ddb_builder();
        b.to_access_level(AccessLevel::Tagging).unwrap();
        assert_eq!(b.render().actions().to_strings(), vec!["dynamodb:TagResource", "dynamodb:UntagResource"]);

        let mut b = ddb_builder();
        b.to_matching("Batch*").unwrap().to_matching("list*").unwrap();
        assert_eq!(
            b.render().actions().to_strings(),
            vec!["dynamodb:BatchGetItem", "dynamodb:BatchWriteItem", "dynamodb:ListTables", "dynamodb:ListTagsOfResource"]
        );

        let mut b = ddb_builder();
        b.to_all_actions().unwrap();
        assert_eq!(b.render().actions().to_strings(), vec!["dynamodb:*"]);
        assert!(b.unknown_permissions().is_empty());

        let mut b = ddb_builder();
        b.to_access_level(AccessLevel::PermissionsManagement).unwrap();
        assert!(!b.has_actions());
    }

    #[test_log::test]
    fn test_unknown_permissions() {
        let mut b = ddb_builder();
        b.to("GetItem").unwrap().to("GetItems").unwrap().to("Describe*").unwrap().to("Frob*").unwrap();
        assert_eq!(b.unknown_permissions(), vec!["dynamodb:GetItems", "dynamodb:Frob*"]);

        // Unknown names are still rendered.
        assert_eq!(b.render().actions().len(), 4);
    }

    #[test_log::test]
    fn test_full_statement() {
        let mut b = ddb_builder();
        b.sid("DenyScans")
            .deny()
            .to("Scan")
            .unwrap()
            .on("table", &["Books"])
            .unwrap()
            .if_condition("FullTableScan", true)
            .if_global(GlobalConditionKey::SourceIp, None, ["10.0.0.0/8", "192.168.0.0/16"], None);

        let s = b.render_strict().unwrap();
        let json = indoc! {r#"
            {
                "Sid": "DenyScans",
                "Effect": "Deny",
                "Action": [
                    "dynamodb:Scan"
                ],
                "Resource": [
                    "arn:aws:dynamodb:*:*:table/Books"
                ],
                "Condition": {
                    "Bool": {
                        "dynamodb:FullTableScan": "true"
                    },
                    "IpAddress": {
                        "aws:SourceIp": [
                            "10.0.0.0/8",
                            "192.168.0.0/16"
                        ]
                    }
                }
            }"#};
        assert_eq!(s.to_string(), json);

        let parsed = Statement::from_str(json).unwrap();
        assert_eq!(parsed, s);

        b.allow();
        assert_eq!(b.render().effect(), Effect::Allow);
    }

    #[test_log::test]
    fn test_parse() {
        let s = Statement::from_str(r#"{"Effect": "Allow", "Action": "s3:GetObject", "Resource": "*"}"#).unwrap();
        assert!(s.applies_to_all_resources());
        assert_eq!(s.actions().to_strings(), vec!["s3:GetObject"]);

        let e = Statement::from_str(r#"{"Action": "s3:GetObject"}"#).unwrap_err();
        assert!(e.to_string().starts_with("missing field `Effect`"));

        let e = Statement::from_str(r#"{"Effect": "Allow", "Effect": "Deny"}"#).unwrap_err();
        assert!(e.to_string().starts_with("duplicate field `Effect`"));

        let e = Statement::from_str(r#"{"Effect": "Allow", "Principal": "*"}"#).unwrap_err();
        assert!(e.to_string().starts_with("unknown field `Principal`, expected one of"));
    }
}
