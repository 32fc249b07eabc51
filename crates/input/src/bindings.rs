use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Control, InputError};

/// Key name to control mapping.
///
/// Key names are compared case-insensitively; `" "` and `"space"` name the
/// same key. Several keys may drive one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Control>",
    into = "BTreeMap<String, Control>"
)]
pub struct KeyBindings {
    map: BTreeMap<String, Control>,
}

impl TryFrom<BTreeMap<String, Control>> for KeyBindings {
    type Error = InputError;

    fn try_from(raw: BTreeMap<String, Control>) -> Result<Self, Self::Error> {
        let mut bindings = Self::empty();
        for (key, control) in raw {
            bindings.bind(&key, control)?;
        }
        Ok(bindings)
    }
}

impl From<KeyBindings> for BTreeMap<String, Control> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.map
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        for (key, control) in [
            ("w", Control::Forward),
            ("s", Control::Back),
            ("a", Control::StrafeLeft),
            ("d", Control::StrafeRight),
            ("space", Control::Jump),
            ("e", Control::Reload),
            ("r", Control::Restart),
        ] {
            map.insert(key.to_string(), control);
        }
        Self { map }
    }
}

/// Canonical form of a key name.
pub fn normalize_key(key: &str) -> String {
    if key == " " {
        return "space".to_string();
    }
    key.trim().to_ascii_lowercase()
}

impl KeyBindings {
    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Bind `key` to `control`, replacing whatever the key drove before.
    pub fn bind(&mut self, key: &str, control: Control) -> Result<(), InputError> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(InputError::EmptyKey);
        }
        self.map.insert(key, control);
        Ok(())
    }

    /// Parse and apply a `control=key` override, e.g. `jump=c`.
    pub fn apply_override(&mut self, spec: &str) -> Result<(), InputError> {
        let (control, key) = spec
            .split_once('=')
            .ok_or_else(|| InputError::MalformedBinding(spec.to_string()))?;
        let control: Control = control.parse()?;
        self.bind(key, control)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Control> {
        self.map.remove(&normalize_key(key))
    }

    pub fn control_for(&self, key: &str) -> Option<Control> {
        self.map.get(&normalize_key(key)).copied()
    }

    /// All keys bound to `control`, in name order.
    pub fn keys_for(&self, control: Control) -> Vec<&str> {
        self.map
            .iter()
            .filter(|(_, c)| **c == control)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
