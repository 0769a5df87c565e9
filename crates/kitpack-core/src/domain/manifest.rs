use serde::{Deserialize, Serialize};
use serde_json::json;

/// `package.json` written next to the bundle so the platform loads it as the
/// right module type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(rename = "type")]
    pub module_type: String,
}

impl PackageManifest {
    pub fn commonjs() -> Self {
        Self {
            module_type: "commonjs".into(),
        }
    }

    /// Compact JSON, no trailing newline.
    pub fn to_json(&self) -> String {
        json!({ "type": self.module_type }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commonjs_is_byte_exact() {
        assert_eq!(PackageManifest::commonjs().to_json(), r#"{"type":"commonjs"}"#);
    }

    #[test]
    fn reads_back() {
        let parsed: PackageManifest =
            serde_json::from_str(&PackageManifest::commonjs().to_json()).unwrap();
        assert_eq!(parsed, PackageManifest::commonjs());
    }
}
