
use indicatif::{ProgressState, ProgressStyle};

/// Template shared by every progress bar; `{msg}` names the current phase
const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {msg} {bar:40.cyan/blue} {pos}/{len} ({percent}); ETA: {eta_precise}; Speed: {per_sec}";

/// Shared function to pull our progress bar styling
pub fn get_progress_style() -> ProgressStyle {
    let style = match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        Ok(s) => s,
        // static template, should not happen
        Err(_e) => ProgressStyle::default_bar()
    };
    style
        .with_key("percent", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}%", state.fraction() * 100.0);
        })
        .with_key("per_sec", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1} files/s", state.per_sec());
        })
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressBar;

    #[test]
    fn test_style_renders() {
        let bar = ProgressBar::hidden().with_style(get_progress_style());
        bar.set_length(4);
        bar.inc(2);
        assert_eq!(bar.position(), 2);
        bar.finish();
    }
}
