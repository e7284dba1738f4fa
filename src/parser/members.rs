// Declaration and member parsers
//
// These operate on lines (or fragments) already accepted by the classifier.
// Class names, parent names and instance variables must be purely alphabetic;
// anything else is rejected rather than guessed at. Method tokens are kept
// verbatim with no validation.

const CLASS_KEYWORD: &str = "class";
const METHOD_KEYWORD: &str = "def";

/// Name and parent extracted from a class declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration<'a> {
    pub name: &'a str,
    pub parent: &'a str,
}

/// Parse `class Name(Parent):` or `class Name(module.Parent):`
///
/// Returns `None` when either the name or the parent is not purely
/// alphabetic, which rules out multiple inheritance, empty parents and
/// deeper qualified paths such as `a.b.Parent`.
pub fn parse_class_declaration(line: &str) -> Option<ClassDeclaration<'_>> {
    let rest = strip_keyword(line, CLASS_KEYWORD)?;

    let open = rest.find('(')?;
    let close = open + 1 + rest[open + 1..].find(')')?;

    let name = &rest[..open];
    let expr = &rest[open + 1..close];
    let parent = match expr.find('.') {
        Some(dot) => &expr[dot + 1..],
        None => expr,
    };

    if !is_alphabetic(name) || !is_alphabetic(parent) {
        return None;
    }

    Some(ClassDeclaration { name, parent })
}

/// Extract the attribute name from a `self.<name> = ` fragment
///
/// The name runs from the first `.` to the first space after it.
pub fn parse_instance_variable(fragment: &str) -> Option<&str> {
    let dot = fragment.find('.')?;
    let after = &fragment[dot + 1..];
    let end = after.find(' ')?;
    let name = &after[..end];

    is_alphabetic(name).then_some(name)
}

/// Extract the method token from a `def name(params):` fragment
pub fn parse_method_token(fragment: &str) -> Option<&str> {
    strip_keyword(fragment, METHOD_KEYWORD)
}

/// Remove leading whitespace, the keyword, and the whitespace that follows it
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(keyword)?;
    let stripped = rest.trim_start();
    // The keyword must be a whole word
    if stripped.len() == rest.len() {
        return None;
    }
    Some(stripped)
}

/// Non-empty and made only of alphabetic characters
fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_declaration() {
        let decl = parse_class_declaration("class Foo(Bar):").unwrap();
        assert_eq!(decl.name, "Foo");
        assert_eq!(decl.parent, "Bar");
    }

    #[test]
    fn test_qualified_parent() {
        let decl = parse_class_declaration("class Foo(module.Bar):").unwrap();
        assert_eq!(decl.name, "Foo");
        assert_eq!(decl.parent, "Bar");
    }

    #[test]
    fn test_indented_declaration() {
        let decl = parse_class_declaration("    class Inner(object):\n").unwrap();
        assert_eq!(decl.name, "Inner");
        assert_eq!(decl.parent, "object");
    }

    #[test]
    fn test_non_alphabetic_parent_rejected() {
        assert!(parse_class_declaration("class Foo(123Bar):").is_none());
        assert!(parse_class_declaration("class Foo(Bar_Base):").is_none());
    }

    #[test]
    fn test_non_alphabetic_name_rejected() {
        assert!(parse_class_declaration("class Foo2(Bar):").is_none());
        assert!(parse_class_declaration("class _Private(Bar):").is_none());
        assert!(parse_class_declaration("class Foo (Bar):").is_none());
    }

    #[test]
    fn test_ambiguous_parents_rejected() {
        assert!(parse_class_declaration("class Foo(Bar, Baz):").is_none());
        assert!(parse_class_declaration("class Foo():").is_none());
        assert!(parse_class_declaration("class Foo(a.b.Bar):").is_none());
        assert!(parse_class_declaration("class Foo(Generic[T]):").is_none());
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert!(parse_class_declaration("classy(Bar):").is_none());
    }

    #[test]
    fn test_instance_variable() {
        assert_eq!(parse_instance_variable("self.count = "), Some("count"));
        assert_eq!(parse_instance_variable("self.firstName = "), Some("firstName"));
    }

    #[test]
    fn test_instance_variable_rejects_non_alphabetic() {
        assert_eq!(parse_instance_variable("self._count = "), None);
        assert_eq!(parse_instance_variable("self.count2 = "), None);
        assert_eq!(parse_instance_variable("self.a.b = "), None);
        assert_eq!(parse_instance_variable("self.x, self.y = "), None);
    }

    #[test]
    fn test_method_token_is_verbatim() {
        assert_eq!(parse_method_token("def run(self):"), Some("run(self):"));
        assert_eq!(
            parse_method_token("    def __init__(self, name, age=3):"),
            Some("__init__(self, name, age=3):")
        );
    }

    #[test]
    fn test_method_token_requires_keyword() {
        assert_eq!(parse_method_token("define(x):"), None);
    }
}
