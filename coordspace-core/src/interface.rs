//! Shader interface names
//!
//! Names the client looks up in a linked program, and the lookup rule: a
//! name the program does not expose is an error, never a silent skip.

/// Matrix uniforms uploaded before every draw, in upload order.
pub const MATRIX_UNIFORMS: [&str; 3] = ["model", "view", "projection"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Attribute,
    Uniform,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Attribute => write!(f, "Vertex attribute"),
            NameKind::Uniform => write!(f, "Uniform"),
        }
    }
}

/// Resolves one name through `lookup`.
pub fn locate<T>(
    kind: NameKind,
    name: &str,
    lookup: impl FnOnce(&str) -> Option<T>,
) -> Result<T, String> {
    lookup(name).ok_or_else(|| format!("{} '{}' not found in shader program", kind, name))
}

/// Resolves every name, stopping at the first one that is missing.
pub fn locate_all<'a, T>(
    kind: NameKind,
    names: impl IntoIterator<Item = &'a str>,
    mut lookup: impl FnMut(&str) -> Option<T>,
) -> Result<Vec<T>, String> {
    names
        .into_iter()
        .map(|name| locate(kind, name, &mut lookup))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::geometry::QUAD_LAYOUT;

    fn active(names: &[&'static str]) -> HashMap<&'static str, u32> {
        names.iter().enumerate().map(|(i, n)| (*n, i as u32)).collect()
    }

    #[test]
    fn test_quad_names_resolve_against_full_program() {
        let attributes = active(&["aPosition", "aTexCoord"]);
        let locations = locate_all(
            NameKind::Attribute,
            QUAD_LAYOUT.attributes.iter().map(|a| a.name),
            |name| attributes.get(name).copied(),
        )
        .unwrap();
        assert_eq!(locations, vec![0, 1]);

        let uniforms = active(&["model", "view", "projection", "texture0"]);
        assert!(locate_all(NameKind::Uniform, MATRIX_UNIFORMS, |name| uniforms.get(name).copied()).is_ok());
    }

    #[test]
    fn test_missing_attribute_is_an_error() {
        let attributes = active(&["aPosition"]);
        let err = locate_all(
            NameKind::Attribute,
            QUAD_LAYOUT.attributes.iter().map(|a| a.name),
            |name| attributes.get(name).copied(),
        )
        .unwrap_err();
        assert_eq!(err, "Vertex attribute 'aTexCoord' not found in shader program");
    }

    #[test]
    fn test_missing_uniform_is_an_error() {
        // "model" misspelled in the shader.
        let uniforms = active(&["modle", "view", "projection"]);
        let err = locate_all(NameKind::Uniform, MATRIX_UNIFORMS, |name| uniforms.get(name).copied())
            .unwrap_err();
        assert_eq!(err, "Uniform 'model' not found in shader program");

        assert!(locate(NameKind::Uniform, "texture1", |name| uniforms.get(name).copied()).is_err());
    }
}
