// ABOUTME: Key naming for records and the index in the backing store.
// ABOUTME: Records live at `<prefix>todo:<id>`; the index list lives at `<prefix>todos`.

/// Builds backing-store keys under an optional namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn record(&self, id: &str) -> String {
        format!("{}todo:{}", self.prefix, id)
    }

    pub fn index(&self) -> String {
        format!("{}todos", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_have_no_prefix() {
        let keys = KeySpace::default();
        assert_eq!(keys.record("01ABC"), "todo:01ABC");
        assert_eq!(keys.index(), "todos");
    }

    #[test]
    fn prefix_is_prepended_verbatim() {
        let keys = KeySpace::new("staging:");
        assert_eq!(keys.record("01ABC"), "staging:todo:01ABC");
        assert_eq!(keys.index(), "staging:todos");
    }
}
