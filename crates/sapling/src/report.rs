use std::fmt::Display;

pub(crate) use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
use sapling_diff::DiffResult;
use sapling_text::PlainText;
use sapling_yellow::TextRange;

/// Text of the new file that no leaf of the old file accounts for.
pub(crate) struct Change {
    range: TextRange,
}

impl Change {
    pub(crate) fn all(result: &DiffResult<PlainText>) -> impl Iterator<Item = Self> + '_ {
        result.changes.iter().map(|&range| Self { range })
    }

    pub(crate) fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Info.title("changed text").snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Note.span(self.range.into()).label("not in the old file"))
                .fold(true),
        );
        renderer.render(message)
    }
}

pub(crate) fn summary(result: &DiffResult<PlainText>) -> String {
    let changes = result.changes.len();
    let plural = if changes == 1 { "change" } else { "changes" };
    format!("reused {} leaves, {changes} {plural}", result.reused)
}

#[cfg(test)]
mod tests {
    use sapling_diff::find_changes;
    use sapling_text::parse;

    use super::*;

    #[test]
    fn one_snippet_per_change() {
        let old = parse("keep this\n").unwrap();
        let text = "keep new this\n";
        let result = find_changes(Some(&old), text);

        let renderer = Renderer::plain();
        let rendered: Vec<_> = Change::all(&result)
            .map(|change| change.render(&renderer, "new.txt", text).to_string())
            .collect();

        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("new.txt"), "{}", rendered[0]);
        assert!(rendered[0].contains("not in the old file"), "{}", rendered[0]);
        assert_eq!(summary(&result), "reused 3 leaves, 1 change");
    }
}
