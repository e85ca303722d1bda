//! Display surfaces for projection results.
//!
//! The engine has no opinion on presentation. Anything that can turn a
//! [`ProjectionResult`] and the input that produced it into output can act as
//! a display surface, so themes are interchangeable adapters over the same
//! calculation.
//!
//! # Example
//!
//! ```
//! use disbursement_projection::calculation::compute_projection;
//! use disbursement_projection::display::{DisplaySurface, TextSurface};
//! use disbursement_projection::models::{DisbursementCurve, ProjectionInput};
//! use rust_decimal::Decimal;
//!
//! let input = ProjectionInput::new(5, Decimal::from(10), Decimal::from(1));
//! let result = compute_projection(5, Decimal::from(10), Decimal::from(1), DisbursementCurve::standard());
//!
//! let text = TextSurface::default().render(&input, &result).unwrap();
//! assert!(text.contains("Days 6-10"));
//! ```

mod json;
mod text;

pub use json::JsonSurface;
pub use text::TextSurface;

use crate::error::EngineResult;
use crate::models::{ProjectionInput, ProjectionResult};

/// A renderer for projection results.
pub trait DisplaySurface {
    /// Renders the result of projecting `input`.
    fn render(&self, input: &ProjectionInput, result: &ProjectionResult) -> EngineResult<String>;
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &T {
    fn render(&self, input: &ProjectionInput, result: &ProjectionResult) -> EngineResult<String> {
        (**self).render(input, result)
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Box<T> {
    fn render(&self, input: &ProjectionInput, result: &ProjectionResult) -> EngineResult<String> {
        (**self).render(input, result)
    }
}
