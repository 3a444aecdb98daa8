use crate::foundation::core::{Point, Viewport};
use crate::host::container::Container;

/// Event categories a component can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Viewport size changes.
    Resize,
    /// Pointer movement anywhere in the viewport.
    PointerMove,
    /// Value changes on a control element.
    Input,
}

/// An event delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// The viewport now has this size.
    Resize(Viewport),
    /// Pointer position in viewport pixels.
    PointerMove(Point),
    /// A control element with id `target` now holds `value`.
    Input {
        /// Element id.
        target: String,
        /// Raw input value.
        value: String,
    },
}

impl HostEvent {
    /// Category used for listener lookup.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Resize(_) => EventKind::Resize,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::Input { .. } => EventKind::Input,
        }
    }
}

/// Page-transition lifecycle signals.
#[derive(Clone, Debug)]
pub enum PageSignal {
    /// Content is about to be replaced; every instance must be torn down.
    WillReplaceContent,
    /// New content is in place with these containers.
    PageReady(Vec<Container>),
}
