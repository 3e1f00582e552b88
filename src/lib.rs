//! Single-variable function plotting: a small expression language plus the
//! numeric pipeline that turns it into renderer-agnostic drawing primitives.

pub mod calc_engine;
pub mod config;
pub mod errors;
pub mod mapper;
pub mod plot;
pub mod raster;
pub mod sampler;

pub use calc_engine::{evaluate, parse, tokenize, Node, Parser, Token};
pub use config::PlotConfig;
pub use errors::{EvalError, LexError, MapError, Phase, PlotError, RangeError, SyntaxError};
pub use mapper::{CoordinateMapper, Domain, Point, Tick, Viewport};
pub use plot::{assemble, plot, DrawingPrimitive, Plot};
pub use raster::Raster;
pub use sampler::{estimate_range, sample, DisplayRange, SamplePoint};
