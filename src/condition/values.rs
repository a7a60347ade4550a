use {
    crate::serutil::StringList,
    chrono::{DateTime, SecondsFormat, Utc},
    ipnet::IpNet,
    std::net::IpAddr,
};

/// A value that can be compared against a condition key.
///
/// Policy documents carry every condition value as a string. Implementations produce the form IAM expects for the
/// value's family: `true`/`false` for booleans, ISO-8601 UTC for dates, CIDR notation for networks and base64 for
/// binary data.
pub trait ConditionValue {
    fn to_condition_value(&self) -> String;
}

impl ConditionValue for str {
    fn to_condition_value(&self) -> String {
        self.to_string()
    }
}

impl ConditionValue for String {
    fn to_condition_value(&self) -> String {
        self.clone()
    }
}

impl<T: ConditionValue + ?Sized> ConditionValue for &T {
    fn to_condition_value(&self) -> String {
        (**self).to_condition_value()
    }
}

impl ConditionValue for bool {
    fn to_condition_value(&self) -> String {
        if *self {
            "true".to_string()
        } else {
            "false".to_string()
        }
    }
}

macro_rules! numeric_condition_value {
    ($($ty:ty),*) => {
        $(
            impl ConditionValue for $ty {
                fn to_condition_value(&self) -> String {
                    self.to_string()
                }
            }

            impl From<$ty> for StringList {
                fn from(v: $ty) -> Self {
                    Self::Single(v.to_condition_value())
                }
            }
        )*
    };
}

numeric_condition_value!(i32, i64, u32, u64, f64);

impl ConditionValue for DateTime<Utc> {
    fn to_condition_value(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl ConditionValue for IpNet {
    fn to_condition_value(&self) -> String {
        self.to_string()
    }
}

impl ConditionValue for IpAddr {
    fn to_condition_value(&self) -> String {
        self.to_string()
    }
}

/// Binary data for `BinaryEquals` comparisons; rendered base64-encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Binary<'a>(pub &'a [u8]);

impl ConditionValue for Binary<'_> {
    fn to_condition_value(&self) -> String {
        base64::encode(self.0)
    }
}

impl From<bool> for StringList {
    fn from(v: bool) -> Self {
        Self::Single(v.to_condition_value())
    }
}

impl From<DateTime<Utc>> for StringList {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Single(v.to_condition_value())
    }
}

impl From<IpNet> for StringList {
    fn from(v: IpNet) -> Self {
        Self::Single(v.to_condition_value())
    }
}

impl From<IpAddr> for StringList {
    fn from(v: IpAddr) -> Self {
        Self::Single(v.to_condition_value())
    }
}

impl From<Binary<'_>> for StringList {
    fn from(v: Binary<'_>) -> Self {
        Self::Single(v.to_condition_value())
    }
}

impl StringList {
    /// Build a list from any sequence of condition values. The result is always the list form, even for a single
    /// element.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ConditionValue,
    {
        Self::List(values.into_iter().map(|v| v.to_condition_value()).collect())
    }
}
