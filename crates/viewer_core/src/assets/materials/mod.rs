//! Material storage and the MTL grammar that fills it

pub mod material_registry;
pub mod mtl_parser;

pub use material_registry::{Material, MaterialAttribute, MaterialRegistry, MAX_MATERIAL_NAME_LEN};
pub use mtl_parser::MtlParser;
