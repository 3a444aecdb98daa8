pub(crate) mod system;
pub(crate) mod updater;
