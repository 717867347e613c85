use super::{replace_file, WriteError};
use crate::analysis::ValuedNoSuggestionsSummary;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn render_valued_summary(summary: &ValuedNoSuggestionsSummary) -> String {
    format!(
        "Number of Employees Feeling Valued without Suggestions: {}\nProportion: {}%\n",
        summary.count,
        summary.proportion()
    )
}

/// Writes the two-line summary, replacing any previous file in one step.
/// Parent directories are not created.
pub fn write_valued_summary(
    path: &Path,
    summary: &ValuedNoSuggestionsSummary,
) -> Result<(), WriteError> {
    let rendered = render_valued_summary(summary);
    replace_file(path, |staged| {
        staged
            .write_all(rendered.as_bytes())
            .map_err(|err| WriteError::io(path, err))
    })?;

    info!(path = %path.display(), "results written");
    Ok(())
}
