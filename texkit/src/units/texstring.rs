use texkit_core::{Serializable, Target};

/// Arbitrary TeX code, serialized verbatim.
///
/// The key only identifies the snippet inside the toolkit; it never shows up
/// in the output.
#[derive(Debug, Clone)]
pub struct TexString {
    key: String,
    text: String,
    target: Target,
}

impl TexString {
    /// Create a new snippet.
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            target: Target::Default,
        }
    }

    /// Route this snippet somewhere other than the default output.
    pub fn to(mut self, target: impl Into<Target>) -> Self {
        self.target = target.into();
        self
    }

    /// Get the TeX code.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Serializable for TexString {
    fn key(&self) -> &str {
        &self.key
    }

    fn serialize(&self) -> String {
        self.text.clone()
    }

    fn target(&self) -> &Target {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_verbatim() {
        let s = TexString::new("emph-msg", r"\emph{Emphasized text}");
        assert_eq!(s.serialize(), r"\emph{Emphasized text}");
        assert_eq!(s.key(), "emph-msg");
    }

    #[test]
    fn test_no_escaping() {
        let s = TexString::new("k", "50% of $x_1$ & more");
        assert_eq!(s.serialize(), "50% of $x_1$ & more");
    }

    #[test]
    fn test_target() {
        let s = TexString::new("k", "x").to("tex_texstring_output.tex");
        assert!(!s.target().is_default());
    }
}
