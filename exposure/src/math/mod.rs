mod median;
mod midspace;

pub(crate) use {median::median, midspace::midspace};
