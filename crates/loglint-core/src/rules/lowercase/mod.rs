pub(crate) mod lowercase;
