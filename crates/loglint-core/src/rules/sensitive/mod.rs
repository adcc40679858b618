pub(crate) mod sensitive;
