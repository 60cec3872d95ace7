pub mod autocorr;
pub mod config;
pub mod convert;
pub mod minmax;
pub mod pipeline;
