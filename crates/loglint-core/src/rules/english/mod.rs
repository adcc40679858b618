pub(crate) mod english;
