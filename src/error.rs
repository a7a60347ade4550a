use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum PolicyBuilderError {
    /// An action name or `service:action` string is malformed.
    InvalidAction(String),

    /// An access level name is not one of the recognized values.
    InvalidAccessLevel(String),

    /// A condition operator could not be parsed.
    InvalidConditionOperator(String),

    /// A condition key type in the service metadata is not recognized.
    InvalidConditionType(String),

    /// A resource string is not a valid ARN pattern.
    InvalidResource(String),

    /// A policy version string is not one of the published versions.
    InvalidPolicyVersion(String),

    /// An ARN template could not be parsed.
    InvalidTemplate(String),

    /// The service metadata does not define the requested resource type.
    UnknownResourceType {
        service: String,
        resource_type: String,
    },

    /// A template placeholder had no value and the scope does not allow wildcard substitution.
    UnresolvedPlaceholder {
        template: String,
        placeholder: String,
    },

    /// A statement was rendered strictly without any selected action.
    EmptyStatement,
}

impl Display for PolicyBuilderError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidAccessLevel(level) => write!(f, "Invalid access level: {}", level),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidConditionType(cond_type) => write!(f, "Invalid condition type: {}", cond_type),
            Self::InvalidResource(resource) => write!(f, "Invalid resource: {}", resource),
            Self::InvalidPolicyVersion(version) => write!(f, "Invalid policy version: {}", version),
            Self::InvalidTemplate(template) => write!(f, "Invalid ARN template: {}", template),
            Self::UnknownResourceType {
                service,
                resource_type,
            } => write!(f, "Unknown resource type for service {}: {}", service, resource_type),
            Self::UnresolvedPlaceholder {
                template,
                placeholder,
            } => write!(f, "Unresolved placeholder ${{{}}} in ARN template: {}", placeholder, template),
            Self::EmptyStatement => f.write_str("Statement has no actions"),
        }
    }
}

impl Error for PolicyBuilderError {}

#[cfg(test)]
mod tests {
    use {
        crate::PolicyBuilderError,
        pretty_assertions::{assert_eq, assert_ne},
    };

    #[test_log::test]
    fn test_display() {
        let _ = format!("{:?}", PolicyBuilderError::InvalidAction("foo".to_string()));
        assert_eq!(PolicyBuilderError::InvalidAction("foo".to_string()).to_string(), "Invalid action: foo");
        assert_eq!(PolicyBuilderError::InvalidAccessLevel("Admin".to_string()).to_string(), "Invalid access level: Admin");
        assert_eq!(
            PolicyBuilderError::InvalidConditionOperator("Foo".to_string()).to_string(),
            "Invalid condition operator: Foo"
        );
        assert_eq!(PolicyBuilderError::InvalidConditionType("Map".to_string()).to_string(), "Invalid condition type: Map");
        assert_eq!(PolicyBuilderError::InvalidResource("arn:aws".to_string()).to_string(), "Invalid resource: arn:aws");
        assert_eq!(
            PolicyBuilderError::InvalidPolicyVersion("2020-01-01".to_string()).to_string(),
            "Invalid policy version: 2020-01-01"
        );
        assert_eq!(PolicyBuilderError::InvalidTemplate("arn:${".to_string()).to_string(), "Invalid ARN template: arn:${");
        assert_eq!(
            PolicyBuilderError::UnknownResourceType {
                service: "dynamodb".to_string(),
                resource_type: "bucket".to_string(),
            }
            .to_string(),
            "Unknown resource type for service dynamodb: bucket"
        );
        assert_eq!(
            PolicyBuilderError::UnresolvedPlaceholder {
                template: "arn:${Partition}:dynamodb:${Region}:${Account}:table/${TableName}".to_string(),
                placeholder: "TableName".to_string(),
            }
            .to_string(),
            "Unresolved placeholder ${TableName} in ARN template: arn:${Partition}:dynamodb:${Region}:${Account}:table/${TableName}"
        );
        assert_eq!(PolicyBuilderError::EmptyStatement.to_string(), "Statement has no actions");
    }

    #[test_log::test]
    fn test_eq() {
        let e1a = PolicyBuilderError::InvalidAction("foo".to_string());
        let e1b = PolicyBuilderError::InvalidAction("foo".to_string());
        let e2 = PolicyBuilderError::InvalidResource("foo".to_string());
        let e3 = PolicyBuilderError::InvalidAction("bar".to_string());

        assert_eq!(e1a, e1b);
        assert_ne!(e1a, e2);
        assert_ne!(e1a, e3);
        assert_ne!(e2, e3);
        assert_ne!(PolicyBuilderError::EmptyStatement, e1a);
    }
}
