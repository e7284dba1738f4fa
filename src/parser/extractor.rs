// Per-file class extraction
//
// Walks the lines of one file in order, keeping track of the most recently
// declared class so that member lines can be attributed to it. The context
// lives only for the duration of a single file.

use crate::parser::classify::{classify_line, LineKind};
use crate::parser::members::{parse_class_declaration, parse_instance_variable, parse_method_token};
use crate::parser::record::ClassRecord;

/// Extracts class records from the lines of a single file
#[derive(Debug, Default)]
pub struct ClassExtractor {
    classes: Vec<ClassRecord>,
    /// Index into `classes` of the current class context
    current: Option<usize>,
}

impl ClassExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line
    pub fn process_line(&mut self, line: &str) {
        let classified = classify_line(line);

        match classified.kind {
            LineKind::ClassDeclaration => {
                if let Some(decl) = parse_class_declaration(classified.fragment) {
                    self.classes.push(ClassRecord::new(decl.name, decl.parent));
                    self.current = Some(self.classes.len() - 1);
                }
            }
            LineKind::InstanceVariableAssignment => {
                if let (Some(class), Some(name)) = (
                    self.current_class_mut(),
                    parse_instance_variable(classified.fragment),
                ) {
                    class.add_instance_variable(name);
                }
            }
            LineKind::MethodDeclaration => {
                if let (Some(class), Some(token)) = (
                    self.current_class_mut(),
                    parse_method_token(classified.fragment),
                ) {
                    class.add_method(token);
                }
            }
            LineKind::Other => {}
        }
    }

    /// The class members are currently attributed to
    pub fn current_class(&self) -> Option<&ClassRecord> {
        self.current.map(|i| &self.classes[i])
    }

    fn current_class_mut(&mut self) -> Option<&mut ClassRecord> {
        self.current.map(|i| &mut self.classes[i])
    }

    /// Records in first-seen declaration order
    pub fn finish(self) -> Vec<ClassRecord> {
        self.classes
    }
}

/// Extract every class declared in a sequence of lines
pub fn extract_classes<'a, I>(lines: I) -> Vec<ClassRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut extractor = ClassExtractor::new();
    for line in lines {
        extractor.process_line(line);
    }
    extractor.finish()
}

/// Extract every class declared in a source string
pub fn extract_from_source(source: &str) -> Vec<ClassRecord> {
    extract_classes(source.lines())
}
