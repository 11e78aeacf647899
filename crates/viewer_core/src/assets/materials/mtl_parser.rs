//! MTL (Material Template Library) line grammar
//!
//! Applies Wavefront .mtl statements to a [`MaterialRegistry`]. Supports the
//! Phong reflectance terms: `newmtl`, `Ns`, `Ka`, `Kd`, `Ks` and `Ke`.
//! Anything else is ignored.

use super::material_registry::{Material, MaterialAttribute, MaterialRegistry, MAX_MATERIAL_NAME_LEN};
use crate::assets::diagnostics::ParseIssue;
use crate::assets::fields::{parse_field, parse_floats};
use crate::foundation::Color;

/// Stateful MTL parser
///
/// Remembers the material opened by the last `newmtl` so attribute lines
/// can be applied to it. The state survives across files, which matches
/// how the loader handles several `mtllib` references in a row.
#[derive(Debug, Clone, Default)]
pub struct MtlParser {
    current: Option<String>,
}

impl MtlParser {
    /// Create a parser with no current material
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the material attribute lines currently apply to
    pub fn current_material(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Apply one tokenized line to `registry`.
    ///
    /// An `Err` is a diagnostic for the caller to record. A `newmtl` with an
    /// overlong name still registers the truncated name and reports it.
    pub fn parse_line(
        &mut self,
        keyword: &str,
        fields: &[&str],
        registry: &mut MaterialRegistry,
    ) -> Result<(), ParseIssue> {
        match keyword {
            "newmtl" => self.begin_material(fields, registry),
            "Ns" => {
                let shininess: f32 = match fields.first() {
                    Some(field) => parse_field(keyword, field)?,
                    None => {
                        return Err(ParseIssue::MissingField {
                            keyword: keyword.to_string(),
                            expected: 1,
                            found: 0,
                        })
                    }
                };
                let name = self.require_current(keyword)?;
                registry.set_value(name, MaterialAttribute::Shininess, Color::new(shininess, 0.0, 0.0, 1.0));
                Ok(())
            }
            "Ka" => self.set_color(keyword, fields, MaterialAttribute::Ambient, registry),
            "Kd" => self.set_color(keyword, fields, MaterialAttribute::Diffuse, registry),
            "Ks" => self.set_color(keyword, fields, MaterialAttribute::Specular, registry),
            "Ke" => self.set_color(keyword, fields, MaterialAttribute::Emission, registry),
            // Ignore unknown commands silently
            _ => Ok(()),
        }
    }

    fn begin_material(&mut self, fields: &[&str], registry: &mut MaterialRegistry) -> Result<(), ParseIssue> {
        let Some(&name) = fields.first() else {
            return Err(ParseIssue::MissingField {
                keyword: "newmtl".to_string(),
                expected: 1,
                found: 0,
            });
        };

        let truncated = name.chars().count() > MAX_MATERIAL_NAME_LEN;
        let name: String = name.chars().take(MAX_MATERIAL_NAME_LEN).collect();
        registry.add(name.clone(), Material::default());
        self.current = Some(name.clone());

        if truncated {
            return Err(ParseIssue::TruncatedMaterialName { name });
        }
        Ok(())
    }

    fn set_color(
        &self,
        keyword: &str,
        fields: &[&str],
        attribute: MaterialAttribute,
        registry: &mut MaterialRegistry,
    ) -> Result<(), ParseIssue> {
        let [r, g, b] = parse_floats::<3>(keyword, fields)?;
        let name = self.require_current(keyword)?;
        registry.set_value(name, attribute, Color::rgb(r, g, b));
        Ok(())
    }

    fn require_current(&self, keyword: &str) -> Result<&str, ParseIssue> {
        self.current.as_deref().ok_or_else(|| ParseIssue::NoCurrentMaterial {
            keyword: keyword.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(parser: &mut MtlParser, registry: &mut MaterialRegistry, line: &str) -> Result<(), ParseIssue> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap();
        let fields: Vec<&str> = tokens.collect();
        parser.parse_line(keyword, &fields, registry)
    }

    #[test]
    fn test_parse_simple_material() {
        let mut parser = MtlParser::new();
        let mut registry = MaterialRegistry::new();
        for line in ["newmtl TestMaterial", "Ka 1.0 1.0 1.0", "Kd 0.8 0.2 0.2", "Ks 0.5 0.5 0.5", "Ns 250.0", "illum 2"] {
            apply(&mut parser, &mut registry, line).unwrap();
        }

        let mat = registry.get("TestMaterial").unwrap();
        assert_eq!(mat.ambient, Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(mat.diffuse, Color::rgb(0.8, 0.2, 0.2));
        assert_eq!(mat.specular, Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(mat.shininess, 250.0);
        assert_eq!(parser.current_material(), Some("TestMaterial"));
    }

    #[test]
    fn test_new_material_starts_zeroed() {
        let mut parser = MtlParser::new();
        let mut registry = MaterialRegistry::new();
        apply(&mut parser, &mut registry, "newmtl Wood").unwrap();
        apply(&mut parser, &mut registry, "Kd 0.6 0.3 0.1").unwrap();
        // Redefining resets every field
        apply(&mut parser, &mut registry, "newmtl Wood").unwrap();
        assert_eq!(registry.get("Wood"), Some(&Material::default()));
    }

    #[test]
    fn test_parse_emission() {
        let mut parser = MtlParser::new();
        let mut registry = MaterialRegistry::new();
        apply(&mut parser, &mut registry, "newmtl EmissiveMat").unwrap();
        apply(&mut parser, &mut registry, "Ke 0.2 0.6 1.0").unwrap();
        assert_eq!(registry.get("EmissiveMat").unwrap().emission, Color::rgb(0.2, 0.6, 1.0));
    }

    #[test]
    fn test_attribute_without_material() {
        let mut parser = MtlParser::new();
        let mut registry = MaterialRegistry::new();
        assert_eq!(
            apply(&mut parser, &mut registry, "Kd 1 0 0"),
            Err(ParseIssue::NoCurrentMaterial { keyword: "Kd".to_string() })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_value_keeps_previous() {
        let mut parser = MtlParser::new();
        let mut registry = MaterialRegistry::new();
        apply(&mut parser, &mut registry, "newmtl Stone").unwrap();
        apply(&mut parser, &mut registry, "Ns 10").unwrap();
        assert!(matches!(
            apply(&mut parser, &mut registry, "Ns shiny"),
            Err(ParseIssue::MalformedNumericField { .. })
        ));
        assert!(matches!(
            apply(&mut parser, &mut registry, "Ka 1 1"),
            Err(ParseIssue::MissingField { expected: 3, found: 2, .. })
        ));
        assert_eq!(registry.get("Stone").unwrap().shininess, 10.0);
    }

    #[test]
    fn test_long_name_is_truncated() {
        let mut parser = MtlParser::new();
        let mut registry = MaterialRegistry::new();
        let long_name = "m".repeat(60);
        let result = apply(&mut parser, &mut registry, &format!("newmtl {long_name}"));

        let stored = "m".repeat(MAX_MATERIAL_NAME_LEN);
        assert_eq!(result, Err(ParseIssue::TruncatedMaterialName { name: stored.clone() }));
        assert!(registry.contains(&stored));
        assert_eq!(parser.current_material(), Some(stored.as_str()));
    }
}
