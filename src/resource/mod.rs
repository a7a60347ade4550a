mod arn;
mod template;

pub use {arn::ResourceArn, template::ArnTemplate};

use {
    serde::{
        de::{self, Deserializer, SeqAccess, Unexpected, Visitor},
        ser::Serializer,
        Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const ANY_RESOURCE: &str = "*";

/// Serialize a statement's resources. No resources means the statement applies to every resource and renders
/// as `"*"`.
pub(crate) fn serialize_resources<S: Serializer>(resources: &[ResourceArn], serializer: S) -> Result<S::Ok, S::Error> {
    if resources.is_empty() {
        serializer.serialize_str(ANY_RESOURCE)
    } else {
        resources.serialize(serializer)
    }
}

struct ResourcesVisitor;

impl<'de> Visitor<'de> for ResourcesVisitor {
    type Value = Vec<ResourceArn>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "\"*\", a resource ARN, or a list of resource ARNs")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == ANY_RESOURCE {
            return Ok(Vec::new());
        }

        match ResourceArn::from_str(v) {
            Ok(arn) => Ok(vec![arn]),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = Vec::new();
        let mut any = false;

        while let Some(s) = access.next_element::<String>()? {
            if s == ANY_RESOURCE {
                any = true;
                continue;
            }

            match ResourceArn::from_str(&s) {
                Ok(arn) => result.push(arn),
                Err(_) => return Err(<A::Error as de::Error>::invalid_value(Unexpected::Str(&s), &self)),
            }
        }

        // A "*" anywhere in the list covers every other entry.
        if any {
            result.clear();
        }

        Ok(result)
    }
}

pub(crate) fn deserialize_resources<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ResourceArn>, D::Error> {
    deserializer.deserialize_any(ResourcesVisitor)
}

#[cfg(test)]
mod tests {
    use {
        super::{deserialize_resources, serialize_resources, ResourceArn},
        pretty_assertions::assert_eq,
        serde::{Deserialize, Serialize},
        std::str::FromStr,
    };

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        #[serde(serialize_with = "serialize_resources", deserialize_with = "deserialize_resources")]
        resource: Vec<ResourceArn>,
    }

    #[test_log::test]
    fn test_any_resource() {
        let h = Holder {
            resource: vec![],
        };
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"resource":"*"}"#);

        let h: Holder = serde_json::from_str(r#"{"resource": "*"}"#).unwrap();
        assert!(h.resource.is_empty());

        let h: Holder =
            serde_json::from_str(r#"{"resource": ["arn:aws:s3:::bucket", "*", "arn:aws:s3:::other"]}"#).unwrap();
        assert!(h.resource.is_empty());
    }

    #[test_log::test]
    fn test_list_order() {
        let h: Holder = serde_json::from_str(r#"{"resource": ["arn:aws:s3:::b", "arn:aws:s3:::a"]}"#).unwrap();
        assert_eq!(
            h.resource,
            vec![ResourceArn::from_str("arn:aws:s3:::b").unwrap(), ResourceArn::from_str("arn:aws:s3:::a").unwrap()]
        );
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"resource":["arn:aws:s3:::b","arn:aws:s3:::a"]}"#);

        let h: Holder = serde_json::from_str(r#"{"resource": "arn:aws:s3:::b"}"#).unwrap();
        assert_eq!(h.resource.len(), 1);

        assert!(serde_json::from_str::<Holder>(r#"{"resource": ["bucket"]}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"resource": "bucket"}"#).is_err());
    }
}
