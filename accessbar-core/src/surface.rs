//! In-memory stand-in for the document root's class list.

use crate::RootSurface;
use crate::prefs::PreferenceToken;

/// Ordered class list with `DOMTokenList` add/remove semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClasses {
    classes: Vec<String>,
}

impl RootClasses {
    pub fn from_classes<I, T>(classes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut root = Self::default();
        for class in classes {
            root.toggle_class(&class.into(), true);
        }
        root
    }

    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.classes.iter().map(String::as_str).collect()
    }

    /// The classes on the root that are preference tokens.
    #[must_use]
    pub fn preference_tokens(&self) -> Vec<&str> {
        self.classes
            .iter()
            .map(String::as_str)
            .filter(|class| PreferenceToken::parse(class).is_some())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}

impl RootSurface for RootClasses {
    fn toggle_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            if !self.contains(class) {
                self.classes.push(class.to_string());
            }
        } else {
            self.classes.retain(|existing| existing != class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_twice_keeps_one_entry() {
        let mut root = RootClasses::from_classes(["js", "js"]);
        root.toggle_class("accessTextSize1", true);
        root.toggle_class("accessTextSize1", true);
        assert_eq!(root.classes(), vec!["js", "accessTextSize1"]);
        assert_eq!(root.preference_tokens(), vec!["accessTextSize1"]);
    }

    #[test]
    fn removing_absent_class_is_a_no_op() {
        let mut root = RootClasses::from_classes(["js"]);
        root.toggle_class("accessDarkContrast", false);
        assert_eq!(root.classes(), vec!["js"]);
    }
}
