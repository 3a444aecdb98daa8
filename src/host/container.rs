use std::collections::BTreeMap;

/// Which preset a container hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerKind {
    /// Light ring with a launch animation.
    Ring,
    /// Drifting star field.
    Stars,
}

/// Optional slider and label elements next to a container.
///
/// Sliders hold a raw value; labels hold display text. Either may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlPanel {
    sliders: BTreeMap<String, String>,
    labels: BTreeMap<String, String>,
}

impl ControlPanel {
    /// Empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slider with an initial value.
    pub fn with_slider(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.sliders.insert(id.into(), value.into());
        self
    }

    /// Add a label with initial text.
    pub fn with_label(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.labels.insert(id.into(), text.into());
        self
    }

    /// `true` if a slider with this id exists.
    pub fn has_slider(&self, id: &str) -> bool {
        self.sliders.contains_key(id)
    }

    /// `true` if a label with this id exists.
    pub fn has_label(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    /// Current slider value.
    pub fn slider_value(&self, id: &str) -> Option<&str> {
        self.sliders.get(id).map(String::as_str)
    }

    /// Current label text.
    pub fn label_text(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub(crate) fn set_slider_value(&mut self, id: &str, value: &str) {
        if let Some(v) = self.sliders.get_mut(id) {
            value.clone_into(v);
        }
    }

    pub(crate) fn set_label_text(&mut self, id: &str, text: &str) {
        if let Some(t) = self.labels.get_mut(id) {
            text.clone_into(t);
        }
    }

    /// `true` when the panel has no elements.
    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty() && self.labels.is_empty()
    }
}

/// An element that hosts one backdrop instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    /// Unique element id.
    pub id: String,
    /// Hosted preset.
    pub kind: ContainerKind,
    /// `data-*` attributes without the `data-` prefix.
    pub data: BTreeMap<String, String>,
    /// Control elements available to the instance.
    pub controls: ControlPanel,
    /// Set once an instance was constructed for this container.
    pub initialized: bool,
}

impl Container {
    /// Container with no data attributes and no controls.
    pub fn new(id: impl Into<String>, kind: ContainerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            data: BTreeMap::new(),
            controls: ControlPanel::default(),
            initialized: false,
        }
    }

    /// Add a data attribute.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attach control elements.
    pub fn with_controls(mut self, controls: ControlPanel) -> Self {
        self.controls = controls;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/container.rs"]
mod tests;
