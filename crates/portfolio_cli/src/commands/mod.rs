pub(crate) mod meta;
pub(crate) mod output;
pub(crate) mod projects;
pub(crate) mod weather;
