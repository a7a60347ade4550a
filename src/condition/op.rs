use {
    crate::PolicyBuilderError,
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const IF_EXISTS_SUFFIX: &str = "IfExists";

/// Comparisons available to the ARN operators.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ArnCmp {
    Equals,
    NotEquals,
    Like,
    NotLike,
}

/// Comparisons available to the ordered (date and numeric) operators.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OrderCmp {
    Equals,
    NotEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
}

/// Comparisons available to the string operators.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StringCmp {
    Equals,
    NotEquals,
    EqualsIgnoreCase,
    NotEqualsIgnoreCase,
    Like,
    NotLike,
}

impl ArnCmp {
    fn suffix(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::Like => "Like",
            Self::NotLike => "NotLike",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        [Self::Equals, Self::NotEquals, Self::Like, Self::NotLike].into_iter().find(|c| c.suffix() == s)
    }
}

impl OrderCmp {
    fn suffix(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::LessThan => "LessThan",
            Self::LessThanEquals => "LessThanEquals",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanEquals => "GreaterThanEquals",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        [
            Self::Equals,
            Self::NotEquals,
            Self::LessThan,
            Self::LessThanEquals,
            Self::GreaterThan,
            Self::GreaterThanEquals,
        ]
        .into_iter()
        .find(|c| c.suffix() == s)
    }
}

impl StringCmp {
    fn suffix(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::EqualsIgnoreCase => "EqualsIgnoreCase",
            Self::NotEqualsIgnoreCase => "NotEqualsIgnoreCase",
            Self::Like => "Like",
            Self::NotLike => "NotLike",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        [
            Self::Equals,
            Self::NotEquals,
            Self::EqualsIgnoreCase,
            Self::NotEqualsIgnoreCase,
            Self::Like,
            Self::NotLike,
        ]
        .into_iter()
        .find(|c| c.suffix() == s)
    }
}

/// A base condition operator, without set qualifiers or the `IfExists` suffix.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    Arn(ArnCmp),
    BinaryEquals,
    Bool,
    Date(OrderCmp),
    IpAddress,
    NotIpAddress,
    Null,
    Numeric(OrderCmp),
    String(StringCmp),
}

impl ConditionOp {
    /// Indicates whether IAM accepts an `IfExists` form of this operator.
    #[inline]
    pub fn supports_if_exists(self) -> bool {
        !matches!(self, Self::Null)
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Arn(cmp) => write!(f, "Arn{}", cmp.suffix()),
            Self::BinaryEquals => f.write_str("BinaryEquals"),
            Self::Bool => f.write_str("Bool"),
            Self::Date(cmp) => write!(f, "Date{}", cmp.suffix()),
            Self::IpAddress => f.write_str("IpAddress"),
            Self::NotIpAddress => f.write_str("NotIpAddress"),
            Self::Null => f.write_str("Null"),
            Self::Numeric(cmp) => write!(f, "Numeric{}", cmp.suffix()),
            Self::String(cmp) => write!(f, "String{}", cmp.suffix()),
        }
    }
}

impl FromStr for ConditionOp {
    type Err = PolicyBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "BinaryEquals" => Some(Self::BinaryEquals),
            "Bool" => Some(Self::Bool),
            "IpAddress" => Some(Self::IpAddress),
            "NotIpAddress" => Some(Self::NotIpAddress),
            "Null" => Some(Self::Null),
            _ => {
                if let Some(rest) = s.strip_prefix("Arn") {
                    ArnCmp::from_suffix(rest).map(Self::Arn)
                } else if let Some(rest) = s.strip_prefix("Date") {
                    OrderCmp::from_suffix(rest).map(Self::Date)
                } else if let Some(rest) = s.strip_prefix("Numeric") {
                    OrderCmp::from_suffix(rest).map(Self::Numeric)
                } else if let Some(rest) = s.strip_prefix("String") {
                    StringCmp::from_suffix(rest).map(Self::String)
                } else {
                    None
                }
            }
        };

        op.ok_or_else(|| PolicyBuilderError::InvalidConditionOperator(s.to_string()))
    }
}

/// The multivalued-key set qualifier placed in front of an operator.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetQualifier {
    ForAnyValue,
    ForAllValues,
}

impl SetQualifier {
    fn prefix(self) -> &'static str {
        match self {
            Self::ForAnyValue => "ForAnyValue:",
            Self::ForAllValues => "ForAllValues:",
        }
    }
}

/// A complete condition operator as it appears in a policy document, e.g. `ForAnyValue:StringEqualsIfExists`.
///
/// Operator names the builder does not recognize are carried verbatim in [Operator::Custom] so newer IAM operators
/// can still be used.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Operator {
    Standard {
        qualifier: Option<SetQualifier>,
        op: ConditionOp,
        if_exists: bool,
    },
    Custom(String),
}

impl Operator {
    /// Parse an operator name, rejecting names that are not standard IAM operators.
    pub fn parse_strict(s: &str) -> Result<Self, PolicyBuilderError> {
        let (qualifier, rest) = if let Some(rest) = s.strip_prefix(SetQualifier::ForAnyValue.prefix()) {
            (Some(SetQualifier::ForAnyValue), rest)
        } else if let Some(rest) = s.strip_prefix(SetQualifier::ForAllValues.prefix()) {
            (Some(SetQualifier::ForAllValues), rest)
        } else {
            (None, s)
        };

        let (base, if_exists) = match rest.strip_suffix(IF_EXISTS_SUFFIX) {
            Some(base) => (base, true),
            None => (rest, false),
        };

        let op = ConditionOp::from_str(base).map_err(|_| PolicyBuilderError::InvalidConditionOperator(s.to_string()))?;
        if if_exists && !op.supports_if_exists() {
            return Err(PolicyBuilderError::InvalidConditionOperator(s.to_string()));
        }

        Ok(Self::Standard {
            qualifier,
            op,
            if_exists,
        })
    }

    /// Returns the same operator with the `IfExists` suffix. Custom operators and `Null` are returned unchanged.
    pub fn if_exists(self) -> Self {
        match self {
            Self::Standard {
                qualifier,
                op,
                ..
            } if op.supports_if_exists() => Self::Standard {
                qualifier,
                op,
                if_exists: true,
            },
            other => other,
        }
    }

    /// Returns the same operator qualified with `ForAnyValue:`.
    pub fn for_any_value(self) -> Self {
        self.with_qualifier(SetQualifier::ForAnyValue)
    }

    /// Returns the same operator qualified with `ForAllValues:`.
    pub fn for_all_values(self) -> Self {
        self.with_qualifier(SetQualifier::ForAllValues)
    }

    fn with_qualifier(self, qualifier: SetQualifier) -> Self {
        match self {
            Self::Standard {
                op,
                if_exists,
                ..
            } => Self::Standard {
                qualifier: Some(qualifier),
                op,
                if_exists,
            },
            other => other,
        }
    }

    /// The base operator, if this is a standard operator.
    pub fn condition_op(&self) -> Option<ConditionOp> {
        match self {
            Self::Standard {
                op,
                ..
            } => Some(*op),
            Self::Custom(_) => None,
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<ConditionOp> for Operator {
    fn from(op: ConditionOp) -> Self {
        Self::Standard {
            qualifier: None,
            op,
            if_exists: false,
        }
    }
}

/// Lenient conversion: anything that is not a standard operator becomes [Operator::Custom].
impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        Self::parse_strict(s).unwrap_or_else(|_| {
            log::debug!("Treating condition operator {:?} as a custom operator", s);
            Self::Custom(s.to_string())
        })
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl FromStr for Operator {
    type Err = PolicyBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Standard {
                qualifier,
                op,
                if_exists,
            } => {
                if let Some(qualifier) = qualifier {
                    f.write_str(qualifier.prefix())?;
                }
                write!(f, "{}", op)?;
                if *if_exists {
                    f.write_str(IF_EXISTS_SUFFIX)?;
                }
                Ok(())
            }
            Self::Custom(name) => f.write_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Operator::from(s))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Shorthand constants for the base operators.
#[allow(non_upper_case_globals)]
pub mod condop {
    use super::{ArnCmp, ConditionOp, OrderCmp, StringCmp};

    pub const ArnEquals: ConditionOp = ConditionOp::Arn(ArnCmp::Equals);
    pub const ArnNotEquals: ConditionOp = ConditionOp::Arn(ArnCmp::NotEquals);
    pub const ArnLike: ConditionOp = ConditionOp::Arn(ArnCmp::Like);
    pub const ArnNotLike: ConditionOp = ConditionOp::Arn(ArnCmp::NotLike);
    pub const BinaryEquals: ConditionOp = ConditionOp::BinaryEquals;
    pub const Bool: ConditionOp = ConditionOp::Bool;
    pub const DateEquals: ConditionOp = ConditionOp::Date(OrderCmp::Equals);
    pub const DateNotEquals: ConditionOp = ConditionOp::Date(OrderCmp::NotEquals);
    pub const DateLessThan: ConditionOp = ConditionOp::Date(OrderCmp::LessThan);
    pub const DateLessThanEquals: ConditionOp = ConditionOp::Date(OrderCmp::LessThanEquals);
    pub const DateGreaterThan: ConditionOp = ConditionOp::Date(OrderCmp::GreaterThan);
    pub const DateGreaterThanEquals: ConditionOp = ConditionOp::Date(OrderCmp::GreaterThanEquals);
    pub const IpAddress: ConditionOp = ConditionOp::IpAddress;
    pub const NotIpAddress: ConditionOp = ConditionOp::NotIpAddress;
    pub const Null: ConditionOp = ConditionOp::Null;
    pub const NumericEquals: ConditionOp = ConditionOp::Numeric(OrderCmp::Equals);
    pub const NumericNotEquals: ConditionOp = ConditionOp::Numeric(OrderCmp::NotEquals);
    pub const NumericLessThan: ConditionOp = ConditionOp::Numeric(OrderCmp::LessThan);
    pub const NumericLessThanEquals: ConditionOp = ConditionOp::Numeric(OrderCmp::LessThanEquals);
    pub const NumericGreaterThan: ConditionOp = ConditionOp::Numeric(OrderCmp::GreaterThan);
    pub const NumericGreaterThanEquals: ConditionOp = ConditionOp::Numeric(OrderCmp::GreaterThanEquals);
    pub const StringEquals: ConditionOp = ConditionOp::String(StringCmp::Equals);
    pub const StringNotEquals: ConditionOp = ConditionOp::String(StringCmp::NotEquals);
    pub const StringEqualsIgnoreCase: ConditionOp = ConditionOp::String(StringCmp::EqualsIgnoreCase);
    pub const StringNotEqualsIgnoreCase: ConditionOp = ConditionOp::String(StringCmp::NotEqualsIgnoreCase);
    pub const StringLike: ConditionOp = ConditionOp::String(StringCmp::Like);
    pub const StringNotLike: ConditionOp = ConditionOp::String(StringCmp::NotLike);
}

#[cfg(test)]
mod tests {
    use {
        super::{condop, ConditionOp, Operator, SetQualifier},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_display_round_trip() {
        let items = vec![
            "ArnEquals",
            "ArnEqualsIfExists",
            "ArnLike",
            "ArnNotEquals",
            "ArnNotLikeIfExists",
            "BinaryEquals",
            "BinaryEqualsIfExists",
            "Bool",
            "BoolIfExists",
            "DateEquals",
            "DateGreaterThan",
            "DateGreaterThanEqualsIfExists",
            "DateLessThanEquals",
            "DateNotEquals",
            "IpAddress",
            "NotIpAddressIfExists",
            "Null",
            "NumericEquals",
            "NumericGreaterThanEquals",
            "NumericLessThanIfExists",
            "NumericNotEquals",
            "StringEquals",
            "StringEqualsIgnoreCase",
            "StringLike",
            "StringLikeIfExists",
            "StringNotEqualsIgnoreCaseIfExists",
            "StringNotLike",
            "ForAnyValue:StringEquals",
            "ForAllValues:StringLikeIfExists",
        ];

        for item in items {
            let op = Operator::from_str(item).unwrap();
            assert!(!op.is_custom());
            assert_eq!(op.to_string(), item);
        }
    }

    #[test_log::test]
    fn test_bad_operators() {
        for bad in ["", "Arn", "StringGreaterThan", "NullIfExists", "ForAnyValue:", "ForSomeValues:StringLike"] {
            assert_eq!(Operator::from_str(bad).unwrap_err().to_string(), format!("Invalid condition operator: {}", bad));
        }

        assert_eq!(ConditionOp::from_str("Date").unwrap_err().to_string(), "Invalid condition operator: Date");
    }

    #[test_log::test]
    fn test_lenient_conversion() {
        let op = Operator::from("op2");
        assert_eq!(op, Operator::Custom("op2".to_string()));
        assert_eq!(op.to_string(), "op2");
        assert_eq!(op.condition_op(), None);

        let op = Operator::from("StringLike");
        assert_eq!(op, Operator::from(condop::StringLike));
        assert_eq!(op.condition_op(), Some(condop::StringLike));
    }

    #[test_log::test]
    fn test_modifiers() {
        let op = Operator::from(condop::StringEquals).for_any_value().if_exists();
        assert_eq!(op.to_string(), "ForAnyValue:StringEqualsIfExists");
        assert_eq!(
            op,
            Operator::Standard {
                qualifier: Some(SetQualifier::ForAnyValue),
                op: condop::StringEquals,
                if_exists: true,
            }
        );

        assert_eq!(Operator::from(condop::Null).if_exists().to_string(), "Null");
        assert_eq!(Operator::from(condop::ArnLike).for_all_values().to_string(), "ForAllValues:ArnLike");
        assert_eq!(Operator::from("Custom").if_exists().for_any_value().to_string(), "Custom");
    }

    #[test_log::test]
    fn test_serde() {
        let op: Operator = serde_json::from_str(r#""NumericLessThan""#).unwrap();
        assert_eq!(op, Operator::from(condop::NumericLessThan));
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""NumericLessThan""#);

        let op: Operator = serde_json::from_str(r#""SomethingNew""#).unwrap();
        assert!(op.is_custom());
        assert!(serde_json::from_str::<Operator>("3").is_err());
    }
}
