use crate::config::{RingConfigPatch, parse_int};
use crate::host::container::ControlPanel;
use crate::host::event::EventKind;
use crate::host::runtime::{Host, ListenerHandle};

/// A ring parameter exposed through a slider and a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingControl {
    /// `particle-slider` / `particle-count`.
    ParticleCount,
    /// `inner-radius-slider` / `inner-radius`.
    InnerRadius,
    /// `sharpness-slider` / `ring-sharpness`.
    RingSharpness,
    /// `scatter-slider` / `scatter-intensity`.
    ScatterIntensity,
}

impl RingControl {
    /// Every control, in binding order.
    pub const ALL: [Self; 4] = [
        Self::ParticleCount,
        Self::InnerRadius,
        Self::RingSharpness,
        Self::ScatterIntensity,
    ];

    /// Id of the slider element.
    pub fn slider_id(self) -> &'static str {
        match self {
            Self::ParticleCount => "particle-slider",
            Self::InnerRadius => "inner-radius-slider",
            Self::RingSharpness => "sharpness-slider",
            Self::ScatterIntensity => "scatter-slider",
        }
    }

    /// Id of the label element.
    pub fn label_id(self) -> &'static str {
        match self {
            Self::ParticleCount => "particle-count",
            Self::InnerRadius => "inner-radius",
            Self::RingSharpness => "ring-sharpness",
            Self::ScatterIntensity => "scatter-intensity",
        }
    }

    /// Patch applying `value` to this parameter; `None` for a negative particle count.
    pub fn patch(self, value: i64) -> Option<RingConfigPatch> {
        let mut p = RingConfigPatch::default();
        match self {
            Self::ParticleCount => p.particle_count = Some(usize::try_from(value).ok()?),
            Self::InnerRadius => p.inner_radius = Some(value as f32),
            Self::RingSharpness => p.ring_sharpness = Some(value as f32),
            Self::ScatterIntensity => p.scatter_intensity = Some(value as f32),
        }
        Some(p)
    }
}

/// Bound slider/label pairs of one ring.
///
/// A control is bound only when both its slider and its label exist; missing elements are
/// skipped without error.
#[derive(Debug)]
pub struct RingControls {
    panel: ControlPanel,
    bindings: Vec<(RingControl, ListenerHandle)>,
}

impl RingControls {
    /// Attach one input listener per complete slider/label pair.
    pub fn bind(host: &mut Host, panel: ControlPanel) -> Self {
        let mut bindings = Vec::new();
        for control in RingControl::ALL {
            if panel.has_slider(control.slider_id()) && panel.has_label(control.label_id()) {
                bindings.push((control, host.add_listener(EventKind::Input)));
            } else {
                tracing::debug!(?control, "control elements missing; not bound");
            }
        }
        Self { panel, bindings }
    }

    /// Bound controls.
    pub fn bound(&self) -> impl Iterator<Item = RingControl> + '_ {
        self.bindings.iter().map(|(c, _)| *c)
    }

    /// Current state of the elements.
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// Match an input event against the bound sliders and parse its integer value.
    pub fn resolve(&mut self, host: &Host, target: &str, raw: &str) -> Option<(RingControl, i64)> {
        let (control, _) = self.bindings.iter().find(|(c, handle)| {
            c.slider_id() == target && host.is_listening(*handle, EventKind::Input)
        })?;
        let control = *control;
        let Some(value) = parse_int(raw) else {
            tracing::warn!(slider = target, raw, "ignoring non-numeric slider input");
            return None;
        };
        self.panel.set_slider_value(control.slider_id(), raw);
        Some((control, value))
    }

    /// Write the applied value into the control's label.
    pub fn show(&mut self, control: RingControl, value: i64) {
        self.panel.set_label_text(control.label_id(), &value.to_string());
    }

    /// Remove every listener. Safe to call repeatedly.
    pub fn unbind(&mut self, host: &mut Host) {
        for (_, handle) in self.bindings.drain(..) {
            host.remove_listener(handle);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/controls.rs"]
mod tests;
