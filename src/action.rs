use {
    crate::PolicyBuilderError,
    log::debug,
    regex::{Regex, RegexBuilder},
    serde::{
        de::{self, Deserializer, SeqAccess, Unexpected, Visitor},
        ser::{SerializeSeq, Serializer},
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        ops::Index,
        str::FromStr,
    },
};

/// A fully qualified `service:Action` permission. The action part may contain `*` and `?` wildcards.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Action {
    service: String,
    action: String,
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, PolicyBuilderError> {
        let service = service.into();
        let action = action.into();

        if service.is_empty() || action.is_empty() {
            debug!("Action '{service}:{action}' has an empty component.");
            return Err(PolicyBuilderError::InvalidAction(format!("{}:{}", service, action)));
        }

        if !service.is_ascii() || !action.is_ascii() {
            debug!("Action '{service}:{action}' is not ASCII.");
            return Err(PolicyBuilderError::InvalidAction(format!("{}:{}", service, action)));
        }

        for (i, c) in service.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && !(i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid service.");
                return Err(PolicyBuilderError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        for (i, c) in action.bytes().enumerate() {
            if !c.is_ascii_alphanumeric()
                && c != b'*'
                && c != b'?'
                && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_'))
            {
                debug!("Action '{service}:{action}' has an invalid action.");
                return Err(PolicyBuilderError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        Ok(Self {
            service,
            action,
        })
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Indicates whether the action part contains a wildcard.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.action.contains(['*', '?'])
    }
}

impl FromStr for Action {
    type Err = PolicyBuilderError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        match v.split_once(':') {
            Some((service, action)) if !action.contains(':') => Action::new(service, action),
            _ => Err(PolicyBuilderError::InvalidAction(v.to_string())),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}:{}", self.service, self.action)
    }
}

/// Build an anchored regular expression from a glob where `*` matches any run of characters and `?` matches one.
pub(crate) fn regex_from_glob(s: &str) -> RegexBuilder {
    let mut pattern = String::with_capacity(2 + s.len());
    pattern.push('^');

    for c in s.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => {
                let escaped: String = regex::escape(&String::from(c));
                pattern.push_str(&escaped);
            }
        }
    }
    pattern.push('$');
    RegexBuilder::new(&pattern)
}

/// Compile an action-name glob. Action names are matched case-insensitively, as IAM does.
pub(crate) fn action_glob(glob: &str) -> Result<Regex, PolicyBuilderError> {
    regex_from_glob(glob).case_insensitive(true).build().map_err(|e| {
        debug!("Action glob {:?} did not compile: {}", glob, e);
        PolicyBuilderError::InvalidAction(glob.to_string())
    })
}

struct ActionVisitor {}
impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "service:action")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match Action::from_str(v) {
            Ok(action) => Ok(action),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ActionVisitor {})
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// An insertion-ordered set of actions. Inserting an action that is already present leaves the set unchanged.
#[derive(Clone, Debug, Default, Eq)]
pub struct ActionSet {
    actions: Vec<Action>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the action if it is not already present. Returns `true` if the set changed.
    pub fn insert(&mut self, action: Action) -> bool {
        if self.actions.contains(&action) {
            false
        } else {
            self.actions.push(action);
            true
        }
    }

    #[inline]
    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// The actions as `service:Action` strings, in insertion order.
    pub fn to_strings(&self) -> Vec<String> {
        self.actions.iter().map(Action::to_string).collect()
    }
}

/// Sets compare equal when they hold the same actions, regardless of insertion order.
impl PartialEq for ActionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.actions.iter().all(|a| other.contains(a))
    }
}

impl Extend<Action> for ActionSet {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        for action in iter {
            self.insert(action);
        }
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl From<Action> for ActionSet {
    fn from(action: Action) -> Self {
        Self {
            actions: vec![action],
        }
    }
}

impl Index<usize> for ActionSet {
    type Output = Action;

    fn index(&self, index: usize) -> &Self::Output {
        &self.actions[index]
    }
}

impl<'a> IntoIterator for &'a ActionSet {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

struct ActionSetVisitor;

impl<'de> Visitor<'de> for ActionSetVisitor {
    type Value = ActionSet;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "a string or a list of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match Action::from_str(v) {
            Ok(action) => Ok(ActionSet::from(action)),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &ActionVisitor {})),
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = ActionSet::new();
        while let Some(action) = access.next_element::<Action>()? {
            result.insert(action);
        }

        Ok(result)
    }
}

impl<'de> Deserialize<'de> for ActionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ActionSetVisitor)
    }
}

impl Serialize for ActionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.actions.len()))?;
        for action in &self.actions {
            seq.serialize_element(action)?;
        }
        seq.end()
    }
}
