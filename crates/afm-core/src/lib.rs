pub mod autocorr;
pub mod consts;
pub mod error;
pub mod io;
pub mod minmax;
pub mod pipeline;
pub mod table;
