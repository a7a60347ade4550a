use {
    crate::PolicyBuilderError,
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The coarse category an action is documented under in the service authorization reference.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AccessLevel {
    List,
    Read,
    Tagging,
    Write,
    PermissionsManagement,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 5] =
        [Self::List, Self::Read, Self::Tagging, Self::Write, Self::PermissionsManagement];

    /// The name as it appears in the service authorization reference.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Read => "Read",
            Self::Tagging => "Tagging",
            Self::Write => "Write",
            Self::PermissionsManagement => "Permissions management",
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = PolicyBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "List" => Ok(Self::List),
            "Read" => Ok(Self::Read),
            "Tagging" => Ok(Self::Tagging),
            "Write" => Ok(Self::Write),
            "Permissions management" | "PermissionsManagement" => Ok(Self::PermissionsManagement),
            _ => Err(PolicyBuilderError::InvalidAccessLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AccessLevel::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
