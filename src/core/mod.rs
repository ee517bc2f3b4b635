pub mod registry;

pub mod template;

pub mod writer;
