mod animate;
mod easings;
mod preview;
mod root;

pub use root::Cli;
