#![warn(clippy::all)]

//! Build IAM policy statements from per-service permission metadata.
//!
//! A [StatementBuilder] is bound to one service's [ServiceMetadata] and a [Scope] of default partition, account and
//! region. It accumulates actions, resources resolved from the service's ARN templates, and conditions, and renders
//! a [Statement] that serializes in policy-document form.

#[macro_use]
pub(crate) mod serutil;

pub(crate) mod access_level;
pub(crate) mod action;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod metadata;
pub(crate) mod policy;
pub(crate) mod resource;
pub(crate) mod scope;
pub(crate) mod statement;

pub use {
    access_level::AccessLevel,
    action::{Action, ActionSet},
    condition::{
        condop, ArnCmp, Binary, ConditionEntry, ConditionOp, ConditionType, ConditionValue, Conditions,
        GlobalConditionKey, Operator, OrderCmp, SetQualifier, StringCmp, ValueType,
    },
    effect::Effect,
    error::PolicyBuilderError,
    metadata::{ActionMetadata, ActionResourceType, ConditionKeyMetadata, ResourceTypeMetadata, ServiceMetadata},
    policy::{Policy, PolicyVersion},
    resource::{ArnTemplate, ResourceArn},
    scope::{
        PlaceholderPolicy, ResourceScope, ResourceScopeBuilder, ResourceScopeBuilderError, Scope, ScopeBuilder,
        ScopeBuilderError,
    },
    serutil::StringList,
    statement::{Statement, StatementBuilder},
};
