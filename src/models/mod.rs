mod feedback;
mod identity;
mod message;
mod request;
mod thread;

pub use feedback::FeedbackRecord;
pub use identity::Identity;
pub use message::{Confidence, Message, Reference, ReferenceKind, ResponsePayload};
pub use request::{ChatRequest, CreateThreadRequest, CreatedThread};
pub use thread::Thread;

use serde::{Deserialize, Deserializer};

/// Helper to deserialize id as either string or integer
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Helper to deserialize a reference kind with null and unknown-value handling.
/// Anything the backend sends that isn't a known kind degrades to `Other`.
pub(crate) fn deserialize_reference_kind<'de, D>(deserializer: D) -> Result<ReferenceKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("intern") => ReferenceKind::Intern,
        Some("professional") => ReferenceKind::Professional,
        _ => ReferenceKind::Other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct IdHolder {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    }

    #[test]
    fn test_deserialize_id_from_string() {
        let holder: IdHolder = serde_json::from_str(r#"{"id":"thread-42"}"#).unwrap();
        assert_eq!(holder.id, "thread-42");
    }

    #[test]
    fn test_deserialize_id_from_integer() {
        let holder: IdHolder = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(holder.id, "42");
    }

    #[derive(Debug, Deserialize)]
    struct KindHolder {
        #[serde(rename = "type", deserialize_with = "deserialize_reference_kind")]
        kind: ReferenceKind,
    }

    #[test]
    fn test_deserialize_reference_kind_known() {
        let holder: KindHolder = serde_json::from_str(r#"{"type":"intern"}"#).unwrap();
        assert_eq!(holder.kind, ReferenceKind::Intern);
        let holder: KindHolder = serde_json::from_str(r#"{"type":"professional"}"#).unwrap();
        assert_eq!(holder.kind, ReferenceKind::Professional);
    }

    #[test]
    fn test_deserialize_reference_kind_unknown_degrades_to_other() {
        let holder: KindHolder = serde_json::from_str(r#"{"type":"alumni"}"#).unwrap();
        assert_eq!(holder.kind, ReferenceKind::Other);
        let holder: KindHolder = serde_json::from_str(r#"{"type":null}"#).unwrap();
        assert_eq!(holder.kind, ReferenceKind::Other);
    }
}
