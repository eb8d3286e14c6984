pub(crate) mod remaining;
