/// Number of covers requested per book when nothing else is configured.
pub const DEFAULT_COVER_COUNT: usize = 5;

/// 1-based cover request that asks the cover service to fail by default.
pub const DEFAULT_FAULT_TARGET: Option<usize> = Some(2);

/// A book cover as served by the external cover service.
///
/// On the wire the content travels as a base64 string, matching the service's
/// JSON encoding of byte arrays.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BookCover {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(with = "base64_bytes"))]
    pub content: Vec<u8>,
}

impl BookCover {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.content.len()
    }
}

// Covers are megabytes of noise; keep them out of debug output.
impl std::fmt::Debug for BookCover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookCover")
            .field("name", &self.name)
            .field("byte_len", &self.content.len())
            .finish()
    }
}

#[cfg(feature = "serde")]
mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn content_is_base64_on_the_wire() {
        let cover = BookCover::new("cover-1", vec![0, 1, 2, 250]);
        let json = serde_json::to_value(&cover).unwrap();
        assert_eq!(json["name"], "cover-1");
        assert_eq!(json["content"], "AAEC+g==");

        let back: BookCover = serde_json::from_value(json).unwrap();
        assert_eq!(back, cover);
    }

    #[test]
    fn invalid_base64_fails_to_decode() {
        let result = serde_json::from_str::<BookCover>(
            r#"{"name":"x","content":"***"}"#,
        );
        assert!(result.is_err());
    }
}
