use {
    super::op::{condop, Operator},
    crate::PolicyBuilderError,
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const ARRAY_PREFIX: &str = "ArrayOf";

/// The type of value a condition key compares against.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueType {
    Arn,
    Binary,
    Bool,
    Date,
    IpAddress,
    Numeric,
    String,
}

impl ValueType {
    /// The operator used for this type when the caller does not name one.
    pub fn default_operator(self) -> Operator {
        Operator::from(match self {
            Self::Arn => condop::ArnLike,
            Self::Binary => condop::BinaryEquals,
            Self::Bool => condop::Bool,
            Self::Date => condop::DateEquals,
            Self::IpAddress => condop::IpAddress,
            Self::Numeric => condop::NumericEquals,
            Self::String => condop::StringLike,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Arn => "ARN",
            Self::Binary => "Binary",
            Self::Bool => "Bool",
            Self::Date => "Date",
            Self::IpAddress => "IPAddress",
            Self::Numeric => "Numeric",
            Self::String => "String",
        }
    }
}

impl FromStr for ValueType {
    type Err = PolicyBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arn" => Ok(Self::Arn),
            "binary" => Ok(Self::Binary),
            "bool" | "boolean" => Ok(Self::Bool),
            "date" => Ok(Self::Date),
            "ipaddress" | "ip" => Ok(Self::IpAddress),
            "numeric" | "long" | "integer" => Ok(Self::Numeric),
            "string" => Ok(Self::String),
            _ => Err(PolicyBuilderError::InvalidConditionType(s.to_string())),
        }
    }
}

/// The declared type of a condition key in service metadata, e.g. `String` or `ArrayOfARN`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConditionType {
    value_type: ValueType,
    multivalued: bool,
}

impl ConditionType {
    pub const STRING: ConditionType = ConditionType::single(ValueType::String);

    pub const fn single(value_type: ValueType) -> Self {
        Self {
            value_type,
            multivalued: false,
        }
    }

    pub const fn array_of(value_type: ValueType) -> Self {
        Self {
            value_type,
            multivalued: true,
        }
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[inline]
    pub fn is_multivalued(&self) -> bool {
        self.multivalued
    }

    /// The family default for this type. Multivalued keys use the element type's default unqualified; callers
    /// wanting set semantics name a `ForAnyValue:`/`ForAllValues:` operator.
    pub fn default_operator(&self) -> Operator {
        self.value_type.default_operator()
    }
}

impl Default for ConditionType {
    fn default() -> Self {
        Self::STRING
    }
}

impl Display for ConditionType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        if self.multivalued {
            f.write_str(ARRAY_PREFIX)?;
        }
        f.write_str(self.value_type.as_str())
    }
}

impl FromStr for ConditionType {
    type Err = PolicyBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let result = match s.strip_prefix(ARRAY_PREFIX) {
            Some(element) => ValueType::from_str(element).map(Self::array_of),
            None => ValueType::from_str(s).map(Self::single),
        };

        result.map_err(|_| PolicyBuilderError::InvalidConditionType(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for ConditionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ConditionType::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for ConditionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
