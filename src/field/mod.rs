pub(crate) mod particles;
pub(crate) mod ring;
pub(crate) mod stars;
