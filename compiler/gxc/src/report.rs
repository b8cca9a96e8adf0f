//! Source-annotated error reports.

use ariadne::{Config, Label, Report, ReportKind, Source};
use gx_parse::ParseError;

/// Render a parse error against the text it came from.
pub fn render_parse_error(path: &str, source: &str, error: &ParseError) -> String {
    let range = error.span().to_range();
    let report = Report::build(ReportKind::Error, path, range.start)
        .with_config(Config::default().with_color(false))
        .with_message(error.to_string())
        .with_label(Label::new((path, range)).with_message(error.label()))
        .finish();

    let mut out = Vec::new();
    if report.write((path, Source::from(source)), &mut out).is_err() {
        return format!("error: {error}");
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gx_ir::Span;

    #[test]
    fn report_names_file_and_message() {
        let source = "a = 1\nb 2\n";
        let error = ParseError::MissingBinding {
            span: Span::new(6, 9),
        };
        let text = render_parse_error("prog.txt", source, &error);
        assert!(text.contains("line is not a binding"));
        assert!(text.contains("prog.txt"));
        assert!(text.contains("expected `name = expression`"));
    }
}
