//! Wavefront OBJ/MTL loader
//!
//! Reads geometry files into a [`ModelBuffer`] and material files into a
//! caller-owned [`MaterialRegistry`]. Only a file that cannot be opened is
//! an error. Every other anomaly becomes a [`ParseDiagnostic`] and the line
//! is skipped.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::diagnostics::{ParseDiagnostic, ParseIssue};
use super::fields::{parse_field, parse_floats};
use super::materials::{MaterialRegistry, MtlParser};
use super::model_buffer::{FaceVertex, ModelBuffer};
use crate::core::config::LoaderConfig;
use crate::foundation::math::Vec3;

/// Which grammar a file is read with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.obj` geometry
    Geometry,
    /// `.mtl` material library
    Material,
}

/// Loader errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// The file could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// Path as given to the loader
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// Single-pass, line-based loader for OBJ and MTL files
///
/// The loader borrows the registry for its lifetime and owns the model it
/// builds. Several files may be loaded into the same loader; geometry and
/// diagnostics accumulate.
#[derive(Debug)]
pub struct ObjLoader<'a> {
    registry: &'a mut MaterialRegistry,
    config: LoaderConfig,
    model: ModelBuffer,
    mtl: MtlParser,
    diagnostics: Vec<ParseDiagnostic>,
    depth: usize,
}

impl<'a> ObjLoader<'a> {
    /// Create a loader with default limits
    pub fn new(registry: &'a mut MaterialRegistry) -> Self {
        Self::with_config(registry, LoaderConfig::default())
    }

    /// Create a loader with explicit limits
    pub fn with_config(registry: &'a mut MaterialRegistry, config: LoaderConfig) -> Self {
        Self {
            registry,
            config,
            model: ModelBuffer::new(),
            mtl: MtlParser::new(),
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Load a file with the grammar for `kind`.
    ///
    /// Fails only when the file cannot be opened. Malformed content is
    /// reported through [`diagnostics`](Self::diagnostics).
    pub fn load<P: AsRef<Path>>(&mut self, path: P, kind: FileKind) -> Result<(), ObjError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            log::warn!("Failed to open {}: {}", path.display(), source);
            ObjError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let issues_before = self.diagnostics.len();
        self.read_lines(BufReader::new(file), Some(path), kind);
        let issues = self.diagnostics.len() - issues_before;

        match kind {
            FileKind::Geometry => log::info!(
                "Loaded {}: {} positions, {} normals, {} tex coords, {} triangles, {} diagnostic(s)",
                path.display(),
                self.model.positions().len(),
                self.model.normals().len(),
                self.model.tex_coords().len(),
                self.model.triangle_count(),
                issues
            ),
            FileKind::Material => log::info!(
                "Loaded {}: {} material(s) registered, {} diagnostic(s)",
                path.display(),
                self.registry.len(),
                issues
            ),
        }
        Ok(())
    }

    /// Parse in-memory text. Relative `mtllib` paths resolve against the
    /// working directory.
    pub fn parse_str(&mut self, contents: &str, kind: FileKind) {
        self.read_lines(contents.as_bytes(), None, kind);
    }

    /// Parse text from any buffered reader
    pub fn parse_reader<R: BufRead>(&mut self, reader: R, kind: FileKind) {
        self.read_lines(reader, None, kind);
    }

    /// Diagnostics recorded so far, in input order
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    /// Drain the recorded diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<ParseDiagnostic> {
        mem::take(&mut self.diagnostics)
    }

    /// Geometry read so far
    pub fn model(&self) -> &ModelBuffer {
        &self.model
    }

    /// Finish loading and keep the geometry
    pub fn into_model(self) -> ModelBuffer {
        self.model
    }

    /// Material opened by the last `newmtl`
    pub fn current_material(&self) -> Option<&str> {
        self.mtl.current_material()
    }

    /// Active limits
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn read_lines<R: BufRead>(&mut self, mut reader: R, source: Option<&Path>, kind: FileKind) {
        let max_len = self.config.max_line_length;
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_no += 1,
                Err(err) => {
                    self.record(source, line_no + 1, ParseIssue::ReadInterrupted { reason: err.to_string() });
                    break;
                }
            }

            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }

            let text = String::from_utf8_lossy(&buf);
            let length = text.chars().count();
            let line: Cow<'_, str> = if length > max_len {
                self.record(
                    source,
                    line_no,
                    ParseIssue::TruncatedLine {
                        kept: max_len,
                        dropped: length - max_len,
                    },
                );
                Cow::Owned(text.chars().take(max_len).collect())
            } else {
                text
            };

            self.parse_line(&line, source, line_no, kind);
        }
    }

    fn parse_line(&mut self, line: &str, source: Option<&Path>, line_no: usize, kind: FileKind) {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return;
        };
        if keyword.starts_with('#') {
            return;
        }
        let fields: Vec<&str> = tokens.collect();

        let result = match kind {
            FileKind::Geometry => self.parse_geometry(keyword, &fields, source, line_no),
            FileKind::Material => self.mtl.parse_line(keyword, &fields, self.registry),
        };
        if let Err(issue) = result {
            self.record(source, line_no, issue);
        }
    }

    fn parse_geometry(
        &mut self,
        keyword: &str,
        fields: &[&str],
        source: Option<&Path>,
        line_no: usize,
    ) -> Result<(), ParseIssue> {
        match keyword {
            "v" => {
                let [x, y, z] = parse_floats::<3>(keyword, fields)?;
                self.model.push_position(Vec3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(keyword, fields)?;
                self.model.push_normal(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(keyword, fields)?;
                self.model.push_tex_coord(u, v);
            }
            "s" => {
                let smooth = match first_field(keyword, fields)? {
                    "off" => false,
                    group => parse_field::<i64>(keyword, group)? > 0,
                };
                self.model.set_smooth_shading(smooth);
            }
            "f" => self.parse_face(fields)?,
            "mtllib" => {
                first_field(keyword, fields)?;
                self.load_libraries(fields, source, line_no);
            }
            "usemtl" => {
                let name = first_field(keyword, fields)?;
                self.model.set_material(name);
            }
            // Ignore other commands
            _ => {}
        }
        Ok(())
    }

    fn parse_face(&mut self, fields: &[&str]) -> Result<(), ParseIssue> {
        if fields.len() < 3 {
            return Err(ParseIssue::MalformedFace { found: fields.len() });
        }

        let triangulate = self.config.triangulate_polygons;
        let used = if triangulate { fields } else { &fields[..3] };
        let vertices = used
            .iter()
            .map(|token| parse_face_vertex(token))
            .collect::<Result<Vec<_>, _>>()?;

        let pattern = vertices[0].pattern();
        if vertices.iter().any(|v| v.pattern() != pattern) {
            let patterns: Vec<&str> = vertices.iter().map(|v| v.pattern().notation()).collect();
            return Err(ParseIssue::AmbiguousFaceFormat {
                patterns: patterns.join(" "),
            });
        }
        if let Some(layout) = self.model.face_layout() {
            if layout != pattern {
                return Err(ParseIssue::FaceLayoutMismatch {
                    expected: layout.notation(),
                    found: pattern.notation(),
                });
            }
        }

        // Fan around the first vertex
        for pair in vertices[1..].windows(2) {
            self.model.push_triangle([vertices[0], pair[0], pair[1]], pattern);
        }

        if !triangulate && fields.len() > 3 {
            return Err(ParseIssue::ExtraFaceVertices {
                ignored: fields.len() - 3,
            });
        }
        Ok(())
    }

    fn load_libraries(&mut self, names: &[&str], source: Option<&Path>, line_no: usize) {
        for name in names {
            let path = resolve_library(name, source);
            if self.depth >= self.config.max_include_depth {
                self.record(
                    source,
                    line_no,
                    ParseIssue::IncludeDepthExceeded {
                        path,
                        limit: self.config.max_include_depth,
                    },
                );
                continue;
            }

            self.depth += 1;
            let result = self.load(&path, FileKind::Material);
            self.depth -= 1;

            if let Err(err) = result {
                let ObjError::Open { path, source: reason } = err;
                self.record(
                    source,
                    line_no,
                    ParseIssue::MaterialLibraryUnavailable {
                        path,
                        reason: reason.to_string(),
                    },
                );
            }
        }
    }

    fn record(&mut self, source: Option<&Path>, line: usize, issue: ParseIssue) {
        let diagnostic = ParseDiagnostic::new(source, line, issue);
        log::debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

fn first_field<'f>(keyword: &str, fields: &[&'f str]) -> Result<&'f str, ParseIssue> {
    fields.first().copied().ok_or_else(|| ParseIssue::MissingField {
        keyword: keyword.to_string(),
        expected: 1,
        found: 0,
    })
}

/// Classify one `v`, `v/t`, `v/t/n` or `v//n` token
fn parse_face_vertex(token: &str) -> Result<FaceVertex, ParseIssue> {
    let mut parts = token.split('/');
    let vertex = parse_field("f", parts.next().unwrap_or_default())?;
    let texture = match parts.next() {
        None | Some("") => None,
        Some(index) => Some(parse_field("f", index)?),
    };
    let normal = match parts.next() {
        None | Some("") => None,
        Some(index) => Some(parse_field("f", index)?),
    };
    if parts.next().is_some() {
        return Err(ParseIssue::MalformedNumericField {
            keyword: "f".to_string(),
            field: token.to_string(),
        });
    }
    Ok(FaceVertex { vertex, texture, normal })
}

/// Relative library paths are tried next to the including file first
fn resolve_library(name: &str, source: Option<&Path>) -> PathBuf {
    let candidate = Path::new(name);
    if candidate.is_relative() {
        if let Some(dir) = source.and_then(Path::parent) {
            let sibling = dir.join(candidate);
            if sibling.exists() {
                return sibling;
            }
        }
    }
    candidate.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::model_buffer::FacePattern;
    use crate::foundation::Color;

    fn parse_with(config: LoaderConfig, contents: &str) -> (ModelBuffer, Vec<ParseDiagnostic>) {
        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::with_config(&mut registry, config);
        loader.parse_str(contents, FileKind::Geometry);
        let diagnostics = loader.take_diagnostics();
        (loader.into_model(), diagnostics)
    }

    fn parse(contents: &str) -> (ModelBuffer, Vec<ParseDiagnostic>) {
        parse_with(LoaderConfig::default(), contents)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("viewer_core_obj_{}_{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_position_line() {
        let (model, diagnostics) = parse("v 1.0 2.0 3.0\n");
        assert_eq!(model.positions(), &[Vec3::new(1.0, 2.0, 3.0)]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_normals_and_tex_coords() {
        let (model, _) = parse("vn 0 1 0\nvt 0.25 0.75\n");
        assert_eq!(model.normals(), &[Vec3::new(0.0, 1.0, 0.0)]);
        assert_eq!(model.tex_coords(), &[Vec3::new(0.25, 0.75, 0.0)]);
    }

    #[test]
    fn test_vertex_only_face() {
        let (model, diagnostics) = parse("f 1 2 3\n");
        assert_eq!(model.vertex_faces(), &[1, 2, 3]);
        assert!(model.normal_faces().is_empty());
        assert!(model.texture_faces().is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_full_face() {
        let (model, _) = parse("f 1/1/1 2/2/2 3/3/3\n");
        assert_eq!(model.vertex_faces(), &[1, 2, 3]);
        assert_eq!(model.texture_faces(), &[1, 2, 3]);
        assert_eq!(model.normal_faces(), &[1, 2, 3]);
    }

    #[test]
    fn test_vertex_normal_face() {
        let (model, _) = parse("f 1//4 2//5 3//6\nf 4/1 5/2 6/3\n");
        assert_eq!(model.vertex_faces(), &[1, 2, 3]);
        assert_eq!(model.normal_faces(), &[4, 5, 6]);
        assert!(model.texture_faces().is_empty());
        assert_eq!(model.face_layout(), Some(FacePattern::VertexNormal));
    }

    #[test]
    fn test_mixed_pattern_face_is_rejected() {
        let (model, diagnostics) = parse("v 0 0 0\nf 1/1 2 3//3\n");
        assert!(model.vertex_faces().is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert_eq!(
            diagnostics[0].issue,
            ParseIssue::AmbiguousFaceFormat {
                patterns: "v/t v v//n".to_string()
            }
        );
    }

    #[test]
    fn test_layout_mismatch_keeps_lists_parallel() {
        let (model, diagnostics) = parse("f 1/1 2/2 3/3\nf 1 2 3\n");
        assert_eq!(model.vertex_faces().len(), model.texture_faces().len());
        assert_eq!(model.triangle_count(), 1);
        assert!(matches!(diagnostics[0].issue, ParseIssue::FaceLayoutMismatch { .. }));
    }

    #[test]
    fn test_short_face() {
        let (model, diagnostics) = parse("f 1 2\n");
        assert!(model.vertex_faces().is_empty());
        assert_eq!(diagnostics[0].issue, ParseIssue::MalformedFace { found: 2 });
    }

    #[test]
    fn test_quad_extra_vertices_ignored() {
        let (model, diagnostics) = parse("f 1 2 3 4\n");
        assert_eq!(model.vertex_faces(), &[1, 2, 3]);
        assert_eq!(diagnostics[0].issue, ParseIssue::ExtraFaceVertices { ignored: 1 });
    }

    #[test]
    fn test_quad_fan_triangulation() {
        let config = LoaderConfig::default().with_triangulation(true);
        let (model, diagnostics) = parse_with(config, "f 1/1 2/2 3/3 4/4\n");
        assert_eq!(model.vertex_faces(), &[1, 2, 3, 1, 3, 4]);
        assert_eq!(model.texture_faces(), &[1, 2, 3, 1, 3, 4]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_negative_indices_are_kept() {
        let (model, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n");
        assert_eq!(model.vertex_faces(), &[-3, -2, -1]);
        assert_eq!(model.corner(2).unwrap().position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_smoothing_groups() {
        assert!(parse("s 1\n").0.is_smooth_shaded());
        assert!(!parse("s 1\ns 0\n").0.is_smooth_shaded());
        assert!(!parse("s 1\ns off\n").0.is_smooth_shaded());
    }

    #[test]
    fn test_malformed_numbers_are_skipped() {
        let (model, diagnostics) = parse("v 1 two 3\nv 1 2\nv 4 5 6\n");
        assert_eq!(model.positions(), &[Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(
            diagnostics[0].issue,
            ParseIssue::MalformedNumericField {
                keyword: "v".to_string(),
                field: "two".to_string()
            }
        );
        assert!(matches!(diagnostics[1].issue, ParseIssue::MissingField { found: 2, .. }));
    }

    #[test]
    fn test_comments_blank_lines_and_unknown_keywords() {
        let (model, diagnostics) = parse("# header\n\n   \no cube\ng side\nv 1 1 1 # tail\n");
        assert_eq!(model.positions().len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_long_line_is_truncated() {
        let config = LoaderConfig::default().with_max_line_length(7);
        let (model, diagnostics) = parse_with(config, "v 1 2 3456\nv 7 8 9\n");
        assert_eq!(
            model.positions(),
            &[Vec3::new(1.0, 2.0, 3.0), Vec3::new(7.0, 8.0, 9.0)]
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].issue, ParseIssue::TruncatedLine { kept: 7, dropped: 3 });
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let (model, diagnostics) = parse("v 1 2 3\r\nv 4 5 6");
        assert_eq!(model.positions().len(), 2);
        assert!(diagnostics.is_empty());
    }

    struct BrokenRead;

    impl io::Read for BrokenRead {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device went away"))
        }
    }

    #[test]
    fn test_read_error_stops_parse() {
        use std::io::Read;

        let reader = BufReader::new(io::Cursor::new(b"v 1 2 3\n".to_vec()).chain(BrokenRead));
        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::new(&mut registry);
        loader.parse_reader(reader, FileKind::Geometry);

        assert_eq!(loader.model().positions(), &[Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(loader.diagnostics().len(), 1);
        assert_eq!(loader.diagnostics()[0].line, 2);
        assert!(matches!(
            loader.diagnostics()[0].issue,
            ParseIssue::ReadInterrupted { .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"o caf\xe9\nv 1 2 3 \xfe\nv 4 \xff 6\n";
        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::new(&mut registry);
        loader.parse_reader(bytes, FileKind::Geometry);

        assert_eq!(loader.model().positions(), &[Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(loader.diagnostics().len(), 1);
        assert_eq!(loader.diagnostics()[0].line, 3);
        assert_eq!(
            loader.diagnostics()[0].issue,
            ParseIssue::MalformedNumericField {
                keyword: "v".to_string(),
                field: "\u{FFFD}".to_string()
            }
        );
    }

    #[test]
    fn test_material_grammar() {
        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::new(&mut registry);
        loader.parse_str("Kd 1 1 1\nnewmtl Wood\nKd 0.6 0.3 0.1\nNs 12\n", FileKind::Material);

        assert_eq!(loader.current_material(), Some("Wood"));
        assert_eq!(
            loader.diagnostics()[0].issue,
            ParseIssue::NoCurrentMaterial { keyword: "Kd".to_string() }
        );
        drop(loader);

        let wood = registry.get("Wood").unwrap();
        assert_eq!(wood.diffuse, Color::rgb(0.6, 0.3, 0.1));
        assert_eq!(wood.shininess, 12.0);
    }

    #[test]
    fn test_load_with_material_library() {
        let dir = scratch_dir("with_library");
        std::fs::write(dir.join("scene.mtl"), "newmtl Wood\nKd 0.6 0.3 0.1\n").unwrap();
        std::fs::write(
            dir.join("scene.obj"),
            "mtllib scene.mtl\nusemtl Wood\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();

        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::new(&mut registry);
        loader.load(dir.join("scene.obj"), FileKind::Geometry).unwrap();
        assert!(loader.diagnostics().is_empty());
        let model = loader.into_model();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(model.material(), Some("Wood"));
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(registry.get_or_default("Wood").diffuse, Color::rgb(0.6, 0.3, 0.1));
    }

    #[test]
    fn test_missing_file_is_the_only_error() {
        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::new(&mut registry);
        let result = loader.load(scratch_dir("missing").join("nope.obj"), FileKind::Geometry);
        assert!(matches!(result, Err(ObjError::Open { .. })));
        assert!(loader.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_library_is_a_diagnostic() {
        let dir = scratch_dir("missing_library");
        std::fs::write(dir.join("lonely.obj"), "mtllib absent.mtl\nv 1 2 3\n").unwrap();

        let mut registry = MaterialRegistry::new();
        let mut loader = ObjLoader::new(&mut registry);
        let result = loader.load(dir.join("lonely.obj"), FileKind::Geometry);
        std::fs::remove_dir_all(&dir).ok();

        assert!(result.is_ok());
        assert_eq!(loader.model().positions().len(), 1);
        assert_eq!(loader.diagnostics().len(), 1);
        assert_eq!(loader.diagnostics()[0].line, 1);
        assert!(matches!(
            loader.diagnostics()[0].issue,
            ParseIssue::MaterialLibraryUnavailable { .. }
        ));
    }

    #[test]
    fn test_include_depth_limit() {
        let dir = scratch_dir("depth_limit");
        std::fs::write(dir.join("skipped.mtl"), "newmtl Skipped\n").unwrap();
        std::fs::write(dir.join("model.obj"), "mtllib skipped.mtl\n").unwrap();

        let mut registry = MaterialRegistry::new();
        let config = LoaderConfig::default().with_max_include_depth(0);
        let mut loader = ObjLoader::with_config(&mut registry, config);
        loader.load(dir.join("model.obj"), FileKind::Geometry).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert!(matches!(
            loader.diagnostics()[0].issue,
            ParseIssue::IncludeDepthExceeded { limit: 0, .. }
        ));
        drop(loader);
        assert!(registry.is_empty());
    }
}
