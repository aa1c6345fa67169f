//! **mazegen** generates perfect mazes with a biased recursive backtracker and renders them to
//! PNG images.
//!
//! ```
//! use mazegen::generators::Bias;
//! use mazegen::maze::MazeContext;
//! use mazegen::renderers::{render_grid, RenderOptions};
//! use mazegen::units::{Height, Width};
//!
//! let mut ctx = MazeContext::new(Width(8), Height(6)).unwrap();
//! ctx.generate(&Bias::default(), &mut rand::thread_rng());
//! assert_eq!(ctx.grid().passages_count(), 8 * 6 - 1);
//!
//! let img = render_grid(ctx.grid(), &RenderOptions::default()).unwrap();
//! assert_eq!(img.dimensions(), (80, 60));
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod renderers;
pub mod stack;
pub mod units;
