pub mod analysis;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod keywords;
pub mod pipeline;
pub mod quality;
pub mod stats;
