// Heuristic, line-local extraction of class records from source text

pub mod classify;
pub mod extractor;
pub mod members;
pub mod record;

pub use classify::{classify, classify_line, Classified, LineKind};
pub use extractor::{extract_classes, extract_from_source, ClassExtractor};
pub use members::{parse_class_declaration, parse_instance_variable, parse_method_token, ClassDeclaration};
pub use record::{ClassId, ClassRecord};
