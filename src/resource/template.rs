use {
    super::ResourceArn,
    crate::{PlaceholderPolicy, PolicyBuilderError, ResourceScope, Scope},
    lazy_static::lazy_static,
    log::{debug, trace, warn},
    regex::Regex,
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([A-Za-z0-9_]+)\}").unwrap();
}

const PARTITION: &str = "Partition";
const SERVICE: &str = "Service";
const REGION: &str = "Region";
const ACCOUNT: &str = "Account";

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A resource ARN template from service metadata, e.g.
/// `arn:${Partition}:dynamodb:${Region}:${Account}:table/${TableName}/index/${IndexName}`.
///
/// `${Partition}`, `${Region}` and `${Account}` are filled from the [Scope] and `${Service}` from the service prefix.
/// Every other placeholder is an identifier, filled positionally in the order the identifiers first appear.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ArnTemplate {
    template: String,
    segments: Vec<Segment>,
    identifiers: Vec<String>,
}

impl ArnTemplate {
    /// The identifier placeholder names, in declared order, without duplicates.
    pub fn identifiers(&self) -> Vec<&str> {
        self.identifiers.iter().map(String::as_str).collect()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Fill in the template.
    ///
    /// Each identifier placeholder is replaced by the corresponding entry of `ids` at its first occurrence only.
    /// Placeholders left without a value become `*`, or an error when the scope's placeholder policy is
    /// [PlaceholderPolicy::Strict].
    pub fn resolve(
        &self,
        service: &str,
        ids: &[&str],
        overrides: &ResourceScope,
        scope: &Scope,
    ) -> Result<ResourceArn, PolicyBuilderError> {
        if ids.len() > self.identifiers.len() {
            warn!(
                "{} identifiers supplied for ARN template {} which takes {}; ignoring the extras",
                ids.len(),
                self.template,
                self.identifiers.len()
            );
        }

        let mut pending: Vec<(&str, Option<&str>)> =
            self.identifiers.iter().enumerate().map(|(i, name)| (name.as_str(), ids.get(i).copied())).collect();
        let mut result = String::with_capacity(self.template.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Placeholder(name) => match name.as_str() {
                    PARTITION => result.push_str(scope.resolve_partition(overrides)),
                    SERVICE => result.push_str(service),
                    REGION => result.push_str(scope.resolve_region(overrides)),
                    ACCOUNT => result.push_str(scope.resolve_account(overrides)),
                    _ => {
                        let value =
                            pending.iter_mut().find(|entry| entry.0 == name.as_str()).and_then(|entry| entry.1.take());
                        match value {
                            Some(value) => result.push_str(value),
                            None => self.unresolved(name, scope, &mut result)?,
                        }
                    }
                },
            }
        }

        trace!("Resolved ARN template {} with {:?} to {}", self.template, ids, result);
        ResourceArn::from_str(&result)
    }

    fn unresolved(&self, name: &str, scope: &Scope, result: &mut String) -> Result<(), PolicyBuilderError> {
        match scope.placeholder_policy() {
            PlaceholderPolicy::Wildcard => {
                debug!("No value for ${{{}}} in ARN template {}; using a wildcard", name, self.template);
                result.push('*');
                Ok(())
            }
            PlaceholderPolicy::Strict => Err(PolicyBuilderError::UnresolvedPlaceholder {
                template: self.template.clone(),
                placeholder: name.to_string(),
            }),
        }
    }
}

impl FromStr for ArnTemplate {
    type Err = PolicyBuilderError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut identifiers: Vec<String> = Vec::new();
        let mut last = 0;

        for cap in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
                continue;
            };

            if whole.start() > last {
                segments.push(Segment::Literal(template[last..whole.start()].to_string()));
            }

            let name = name.as_str();
            if !matches!(name, PARTITION | SERVICE | REGION | ACCOUNT) && !identifiers.iter().any(|i| i == name) {
                identifiers.push(name.to_string());
            }

            segments.push(Segment::Placeholder(name.to_string()));
            last = whole.end();
        }

        if last < template.len() {
            segments.push(Segment::Literal(template[last..].to_string()));
        }

        // Any `${` left in literal text is an unterminated or malformed placeholder.
        let malformed = segments.iter().any(|s| matches!(s, Segment::Literal(text) if text.contains("${")));

        // With every placeholder filled, the template must be a well-formed ARN.
        let sample: String = segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(_) => "x",
            })
            .collect();

        if malformed || ResourceArn::from_str(&sample).is_err() {
            debug!("ARN template {:?} is malformed", template);
            return Err(PolicyBuilderError::InvalidTemplate(template.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
            identifiers,
        })
    }
}

impl Display for ArnTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.template)
    }
}

impl<'de> Deserialize<'de> for ArnTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ArnTemplate::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for ArnTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.template)
    }
}
