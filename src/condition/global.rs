use {
    super::op::{condop, Operator},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Condition keys available to every service under the `aws:` prefix.
///
/// The tag keys ([GlobalConditionKey::PrincipalTag], [GlobalConditionKey::RequestTag] and
/// [GlobalConditionKey::ResourceTag]) are parameterized by the tag name, e.g. `aws:RequestTag/Owner`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum GlobalConditionKey {
    CalledVia,
    CalledViaFirst,
    CalledViaLast,
    CurrentTime,
    EpochTime,
    MultiFactorAuthAge,
    MultiFactorAuthPresent,
    PrincipalAccount,
    PrincipalArn,
    PrincipalOrgId,
    PrincipalOrgPaths,
    PrincipalTag,
    PrincipalType,
    Referer,
    RequestedRegion,
    RequestTag,
    ResourceTag,
    SecureTransport,
    SourceAccount,
    SourceArn,
    SourceIp,
    SourceVpc,
    SourceVpce,
    TagKeys,
    TokenIssueTime,
    UserAgent,
    Userid,
    Username,
    ViaAwsService,
    VpcSourceIp,
}

impl GlobalConditionKey {
    pub const ALL: [GlobalConditionKey; 30] = [
        Self::CalledVia,
        Self::CalledViaFirst,
        Self::CalledViaLast,
        Self::CurrentTime,
        Self::EpochTime,
        Self::MultiFactorAuthAge,
        Self::MultiFactorAuthPresent,
        Self::PrincipalAccount,
        Self::PrincipalArn,
        Self::PrincipalOrgId,
        Self::PrincipalOrgPaths,
        Self::PrincipalTag,
        Self::PrincipalType,
        Self::Referer,
        Self::RequestedRegion,
        Self::RequestTag,
        Self::ResourceTag,
        Self::SecureTransport,
        Self::SourceAccount,
        Self::SourceArn,
        Self::SourceIp,
        Self::SourceVpc,
        Self::SourceVpce,
        Self::TagKeys,
        Self::TokenIssueTime,
        Self::UserAgent,
        Self::Userid,
        Self::Username,
        Self::ViaAwsService,
        Self::VpcSourceIp,
    ];

    /// The key name. For tag keys this is the prefix without the tag name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CalledVia => "aws:CalledVia",
            Self::CalledViaFirst => "aws:CalledViaFirst",
            Self::CalledViaLast => "aws:CalledViaLast",
            Self::CurrentTime => "aws:CurrentTime",
            Self::EpochTime => "aws:EpochTime",
            Self::MultiFactorAuthAge => "aws:MultiFactorAuthAge",
            Self::MultiFactorAuthPresent => "aws:MultiFactorAuthPresent",
            Self::PrincipalAccount => "aws:PrincipalAccount",
            Self::PrincipalArn => "aws:PrincipalArn",
            Self::PrincipalOrgId => "aws:PrincipalOrgID",
            Self::PrincipalOrgPaths => "aws:PrincipalOrgPaths",
            Self::PrincipalTag => "aws:PrincipalTag",
            Self::PrincipalType => "aws:PrincipalType",
            Self::Referer => "aws:Referer",
            Self::RequestedRegion => "aws:RequestedRegion",
            Self::RequestTag => "aws:RequestTag",
            Self::ResourceTag => "aws:ResourceTag",
            Self::SecureTransport => "aws:SecureTransport",
            Self::SourceAccount => "aws:SourceAccount",
            Self::SourceArn => "aws:SourceArn",
            Self::SourceIp => "aws:SourceIp",
            Self::SourceVpc => "aws:SourceVpc",
            Self::SourceVpce => "aws:SourceVpce",
            Self::TagKeys => "aws:TagKeys",
            Self::TokenIssueTime => "aws:TokenIssueTime",
            Self::UserAgent => "aws:UserAgent",
            Self::Userid => "aws:userid",
            Self::Username => "aws:username",
            Self::ViaAwsService => "aws:ViaAWSService",
            Self::VpcSourceIp => "aws:VpcSourceIp",
        }
    }

    /// Indicates whether the key takes a tag name, as in `aws:ResourceTag/<name>`.
    #[inline]
    pub fn takes_sub_key(self) -> bool {
        matches!(self, Self::PrincipalTag | Self::RequestTag | Self::ResourceTag)
    }

    /// The key as stored in a statement, with the tag name appended for tag keys.
    pub fn key(self, sub_key: Option<&str>) -> String {
        match sub_key {
            Some(sub_key) if self.takes_sub_key() => format!("{}/{}", self.name(), sub_key),
            _ => self.name().to_string(),
        }
    }

    pub fn default_operator(self) -> Operator {
        match self {
            Self::CalledVia => Operator::from(condop::StringEquals).for_any_value(),
            Self::CurrentTime | Self::EpochTime => Operator::from(condop::DateLessThanEquals),
            Self::MultiFactorAuthAge => Operator::from(condop::NumericLessThan),
            Self::MultiFactorAuthPresent | Self::SecureTransport | Self::ViaAwsService => Operator::from(condop::Bool),
            Self::PrincipalArn | Self::SourceArn => Operator::from(condop::ArnLike),
            Self::SourceIp | Self::VpcSourceIp => Operator::from(condop::IpAddress),
            Self::TokenIssueTime => Operator::from(condop::DateGreaterThanEquals),
            _ => Operator::from(condop::StringLike),
        }
    }

    /// Find the global key a fully spelled condition key belongs to. `aws:RequestTag/Owner` resolves to
    /// [GlobalConditionKey::RequestTag].
    pub fn lookup(key: &str) -> Option<Self> {
        let base = key.split_once('/').map(|(base, _)| base).unwrap_or(key);
        Self::ALL.into_iter().find(|k| {
            if k.takes_sub_key() {
                key.len() > base.len() && k.name() == base
            } else {
                k.name() == key
            }
        })
    }
}

impl Display for GlobalConditionKey {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}
