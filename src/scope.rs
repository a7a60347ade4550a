use {
    derive_builder::Builder,
    serde::{Deserialize, Serialize},
    std::env,
};

pub(crate) const WILDCARD: &str = "*";
pub(crate) const DEFAULT_PARTITION: &str = "aws";

/// What to do with a placeholder in an ARN template that no value was supplied for.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PlaceholderPolicy {
    /// Substitute `*`.
    #[default]
    Wildcard,

    /// Fail with [crate::PolicyBuilderError::UnresolvedPlaceholder].
    Strict,
}

/// Default partition, account and region used when resolving resource ARNs.
///
/// A [Scope] is handed to every [crate::StatementBuilder]; nothing is read from the process environment unless the
/// caller asks for it through [Scope::from_env].
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "PascalCase")]
pub struct Scope {
    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    partition: Option<String>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<String>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,

    #[builder(default)]
    placeholder_policy: PlaceholderPolicy,
}

display_json!(Scope);
from_str_json!(Scope);

impl Scope {
    pub fn builder() -> ScopeBuilder {
        ScopeBuilder::default()
    }

    /// Read defaults from `AWS_PARTITION`, `AWS_ACCOUNT_ID` and `AWS_REGION` (falling back to `AWS_DEFAULT_REGION`).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let region = lookup("AWS_REGION").filter(|r| !r.is_empty()).or_else(|| lookup("AWS_DEFAULT_REGION"));

        let result = Self {
            partition: lookup("AWS_PARTITION"),
            account: lookup("AWS_ACCOUNT_ID"),
            region,
            placeholder_policy: PlaceholderPolicy::default(),
        };

        log::trace!("Scope from environment: {:?}", result);
        result
    }

    /// The default partition. Empty strings are treated as unset.
    #[inline]
    pub fn partition(&self) -> Option<&str> {
        non_empty(&self.partition)
    }

    #[inline]
    pub fn account(&self) -> Option<&str> {
        non_empty(&self.account)
    }

    #[inline]
    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }

    #[inline]
    pub fn placeholder_policy(&self) -> PlaceholderPolicy {
        self.placeholder_policy
    }

    /// Returns a copy of this scope using the given placeholder policy.
    pub fn with_placeholder_policy(&self, placeholder_policy: PlaceholderPolicy) -> Self {
        Self {
            placeholder_policy,
            ..self.clone()
        }
    }

    /// Partition for a resource: the override, else the default, else `aws`.
    pub fn resolve_partition<'a>(&'a self, overrides: &'a ResourceScope) -> &'a str {
        overrides.partition().or_else(|| self.partition()).unwrap_or(DEFAULT_PARTITION)
    }

    /// Account for a resource: the override, else the default, else `*`.
    pub fn resolve_account<'a>(&'a self, overrides: &'a ResourceScope) -> &'a str {
        overrides.account().or_else(|| self.account()).unwrap_or(WILDCARD)
    }

    /// Region for a resource: the override, else the default, else `*`.
    pub fn resolve_region<'a>(&'a self, overrides: &'a ResourceScope) -> &'a str {
        overrides.region().or_else(|| self.region()).unwrap_or(WILDCARD)
    }
}

/// Per-resource overrides of the [Scope] defaults.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
pub struct ResourceScope {
    #[builder(setter(into, strip_option), default)]
    partition: Option<String>,

    #[builder(setter(into, strip_option), default)]
    account: Option<String>,

    #[builder(setter(into, strip_option), default)]
    region: Option<String>,
}

impl ResourceScope {
    pub fn builder() -> ResourceScopeBuilder {
        ResourceScopeBuilder::default()
    }

    #[inline]
    pub fn partition(&self) -> Option<&str> {
        non_empty(&self.partition)
    }

    #[inline]
    pub fn account(&self) -> Option<&str> {
        non_empty(&self.account)
    }

    #[inline]
    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use {
        super::{PlaceholderPolicy, ResourceScope, Scope},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::{collections::HashMap, str::FromStr},
    };

    #[test_log::test]
    fn test_precedence() {
        let empty = Scope::default();
        let scoped = Scope::builder().partition("aws-cn").account("111122223333").region("cn-north-1").build().unwrap();
        let no_overrides = ResourceScope::default();
        let overrides =
            ResourceScope::builder().partition("aws-us-gov").account("444455556666").region("us-gov-west-1").build().unwrap();

        assert_eq!(empty.resolve_partition(&no_overrides), "aws");
        assert_eq!(empty.resolve_account(&no_overrides), "*");
        assert_eq!(empty.resolve_region(&no_overrides), "*");

        assert_eq!(scoped.resolve_partition(&no_overrides), "aws-cn");
        assert_eq!(scoped.resolve_account(&no_overrides), "111122223333");
        assert_eq!(scoped.resolve_region(&no_overrides), "cn-north-1");

        assert_eq!(scoped.resolve_partition(&overrides), "aws-us-gov");
        assert_eq!(scoped.resolve_account(&overrides), "444455556666");
        assert_eq!(scoped.resolve_region(&overrides), "us-gov-west-1");
        assert_eq!(empty.resolve_account(&overrides), "444455556666");
    }

    #[test_log::test]
    fn test_empty_strings_are_unset() {
        let scope = Scope::builder().account("").region("eu-west-1").build().unwrap();
        let overrides = ResourceScope::builder().region("").partition("").build().unwrap();

        assert_eq!(scope.account(), None);
        assert_eq!(scope.resolve_account(&overrides), "*");
        assert_eq!(scope.resolve_region(&overrides), "eu-west-1");
        assert_eq!(scope.resolve_partition(&overrides), "aws");
    }

    #[test_log::test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("AWS_ACCOUNT_ID", "123456789012"), ("AWS_DEFAULT_REGION", "us-west-2")]);
        let scope = Scope::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(scope.account(), Some("123456789012"));
        assert_eq!(scope.region(), Some("us-west-2"));
        assert_eq!(scope.partition(), None);

        let vars: HashMap<&str, &str> = HashMap::from([("AWS_REGION", "eu-central-1"), ("AWS_DEFAULT_REGION", "us-west-2")]);
        let scope = Scope::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(scope.region(), Some("eu-central-1"));
        assert_eq!(scope.placeholder_policy(), PlaceholderPolicy::Wildcard);
    }

    #[test_log::test]
    fn test_serde() {
        let scope = Scope::from_str(r#"{"Account": "123456789012", "PlaceholderPolicy": "Strict"}"#).unwrap();
        assert_eq!(scope.account(), Some("123456789012"));
        assert_eq!(scope.placeholder_policy(), PlaceholderPolicy::Strict);
        assert_eq!(scope.with_placeholder_policy(PlaceholderPolicy::Wildcard).account(), Some("123456789012"));

        assert_eq!(
            scope.to_string(),
            indoc! {r#"
            {
                "Account": "123456789012",
                "PlaceholderPolicy": "Strict"
            }"#}
        );

        assert!(Scope::from_str(r#"{"Acount": "123456789012"}"#).is_err());
    }
}
