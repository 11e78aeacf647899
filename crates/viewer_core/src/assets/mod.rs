//! Asset loading: Wavefront geometry, materials and parse diagnostics

pub mod diagnostics;
mod fields;
pub mod materials;
pub mod model_buffer;
pub mod obj_loader;

pub use diagnostics::{ParseDiagnostic, ParseIssue};
pub use materials::{Material, MaterialAttribute, MaterialRegistry, MtlParser};
pub use model_buffer::{FaceCorner, FacePattern, FaceVertex, ModelBuffer};
pub use obj_loader::{FileKind, ObjError, ObjLoader};
