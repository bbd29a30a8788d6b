use serde::Deserialize;

/// Flags governing one whole `to_dict` / `from_dict` call tree.
///
/// `Options` is a plain value passed down every recursive call, it is never
/// stored in the registry. It can be loaded from configuration, absent fields
/// keep their defaults:
///
/// ```
/// use autodict_core::Options;
///
/// let options: Options = serde_json::from_str(r#"{ "with_cls": false }"#).unwrap();
/// assert_eq!(options, Options::new().with_cls(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Descend into container items and record fields.
    pub recursively: bool,
    /// Raise on types without a strategy instead of passing them through.
    pub strict: bool,
    /// Embed the type tag on encode and honor it on decode.
    pub with_cls: bool,
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    /// All flags on.
    pub const DEFAULT: Self = Self {
        recursively: true,
        strict: true,
        with_cls: true,
    };

    /// Creates the default options, all flags on.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns a copy with `recursively` set.
    #[inline]
    pub const fn recursively(mut self, recursively: bool) -> Self {
        self.recursively = recursively;
        self
    }

    /// Returns a copy with `strict` set.
    #[inline]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns a copy with `with_cls` set.
    #[inline]
    pub const fn with_cls(mut self, with_cls: bool) -> Self {
        self.with_cls = with_cls;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Options;

    #[test]
    fn partial_configuration() {
        let options: Options = serde_json::from_str(r#"{ "strict": false }"#).unwrap();
        assert!(!options.strict);
        assert!(options.recursively);
        assert!(options.with_cls);

        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());
    }
}
