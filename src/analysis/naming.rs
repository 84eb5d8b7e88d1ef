//! Property-name derivation from setter method names.

/// A naming convention that maps setter methods to property names.
pub trait PropertyNaming: Send + Sync {
    /// Whether `method_name` looks like a setter.
    fn is_setter_name(&self, method_name: &str) -> bool;

    /// The property a setter assigns, or `None` if `method_name` is not a setter.
    fn property_name(&self, method_name: &str) -> Option<String>;
}

const SET_PREFIX: &str = "set";

/// JavaBeans setter convention: `setTimeout` assigns `timeout`, `setURL` assigns `URL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeanNaming;

impl PropertyNaming for BeanNaming {
    fn is_setter_name(&self, method_name: &str) -> bool {
        method_name
            .strip_prefix(SET_PREFIX)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_uppercase())
    }

    fn property_name(&self, method_name: &str) -> Option<String> {
        if !self.is_setter_name(method_name) {
            return None;
        }
        Some(decapitalize(&method_name[SET_PREFIX.len()..]))
    }
}

/// `Foo` -> `foo`, `URL` -> `URL`, `X` -> `x`.
fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    // Leading acronyms keep their case.
    if chars.clone().next().is_some_and(|c| c.is_uppercase()) && first.is_uppercase() {
        return name.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setter_names() {
        let naming = BeanNaming;
        assert!(naming.is_setter_name("setTimeout"));
        assert!(naming.is_setter_name("setX"));
        assert!(!naming.is_setter_name("set"));
        assert!(!naming.is_setter_name("setup"));
        assert!(!naming.is_setter_name("enableLogging"));
        assert!(!naming.is_setter_name("reset"));
    }

    #[test]
    fn test_property_names() {
        let naming = BeanNaming;
        assert_eq!(naming.property_name("setTimeout").as_deref(), Some("timeout"));
        assert_eq!(naming.property_name("setURL").as_deref(), Some("URL"));
        assert_eq!(naming.property_name("setX").as_deref(), Some("x"));
        assert_eq!(naming.property_name("setHostName").as_deref(), Some("hostName"));
        assert_eq!(naming.property_name("build"), None);
    }
}
