//! JSON display surface.

use serde::Serialize;

use crate::error::EngineResult;
use crate::models::{ProjectionInput, ProjectionResult, ProjectionStatus};

use super::DisplaySurface;

#[derive(Serialize)]
struct JsonView<'a> {
    input: &'a ProjectionInput,
    status: ProjectionStatus,
    result: &'a ProjectionResult,
}

/// Renders the input echo, status and full result as JSON.
///
/// Decimal values are written as strings so no precision is lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSurface {
    pretty: bool,
}

impl JsonSurface {
    /// Creates a surface that writes compact JSON.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Creates a surface that writes indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DisplaySurface for JsonSurface {
    fn render(&self, input: &ProjectionInput, result: &ProjectionResult) -> EngineResult<String> {
        let view = JsonView {
            input,
            status: result.status(),
            result,
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        Ok(rendered)
    }
}
